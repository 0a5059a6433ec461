//! Keepsake Core
//!
//! Domain types, traits, and error handling shared by every Keepsake crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `MediaItem`, `FolderSelector`, `FavoriteRef`, `DiaryEntry`, `Account`
//! - **Backend Traits**: `ObjectStore`, `FavoritesStore`, `DiaryStore`, `AccountStore`
//! - **Error Handling**: Unified `KeepsakeError` and `Result` types
//!
//! Backends are always passed in explicitly (usually as `Arc<dyn Trait>`), so
//! tests can swap in a fake store without touching global state.
//!
//! # Example
//!
//! ```rust
//! use keepsake_core::{FolderSelector, Library, MediaKind};
//!
//! assert_eq!(FolderSelector::parse("All/Root"), FolderSelector::All);
//! assert_eq!(MediaKind::classify(Library::Photos, "beach.MOV"), MediaKind::Video);
//! assert_eq!(MediaKind::classify(Library::Songs, "intro.mov"), MediaKind::Audio);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{KeepsakeError, Result};
pub use traits::{AccountStore, DiaryStore, FavoritesStore, ObjectStore};

pub use types::{
    // Accounts
    Account, AccountId, NewAccount,
    // Diary
    CreateDiaryEntry, DiaryEntry, DiaryEntryId, DiaryMedia, DiaryQuery, UpdateDiaryEntry,
    // Favorites
    FavoriteRef,
    // Folders and objects
    FolderSelector, ListOptions, ObjectEntry, SortOrder, ALL_FOLDER,
    // Media
    Library, MediaItem, MediaKind,
};
