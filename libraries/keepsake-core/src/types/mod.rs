mod account;
mod diary;
mod favorite;
mod folder;
mod ids;
mod library;
mod media;
mod object;

pub use account::{Account, NewAccount};
pub use diary::{CreateDiaryEntry, DiaryEntry, DiaryMedia, DiaryQuery, UpdateDiaryEntry};
pub use favorite::FavoriteRef;
pub use folder::{
    file_name, is_folder_name, is_hidden_entry, join_path, FolderSelector, ALL_FOLDER,
    ALL_ROOT_FOLDER, FAVORITES_FOLDER,
};
pub use ids::{AccountId, DiaryEntryId};
pub use library::Library;
pub use media::{MediaItem, MediaKind, VIDEO_EXTENSIONS};
pub use object::{ListOptions, ObjectEntry, SortOrder};
