//! Virtual folders in a flat object-store namespace
//!
//! A folder is just the prefix segment before `/`. The only thing telling a
//! folder apart from a file at the bucket root is that folder names never
//! contain a `.`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthetic folder selecting every real folder plus root-level items
pub const ALL_FOLDER: &str = "All";

/// Alternate spelling of [`ALL_FOLDER`] used by the song library tabs
pub const ALL_ROOT_FOLDER: &str = "All/Root";

/// Virtual folder backed by the favorites relation
pub const FAVORITES_FOLDER: &str = "favorites";

/// Which slice of a library a listing or upload targets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FolderSelector {
    /// Every real folder, then root-level items
    All,

    /// Items referenced by the favorites relation
    Favorites,

    /// Root-level items only
    Root,

    /// One real folder
    Named(String),
}

impl FolderSelector {
    /// Parse a folder string as sent by the UI
    pub fn parse(folder: &str) -> Self {
        match folder.trim().trim_matches('/') {
            "" => FolderSelector::Root,
            ALL_FOLDER | ALL_ROOT_FOLDER => FolderSelector::All,
            FAVORITES_FOLDER => FolderSelector::Favorites,
            other => FolderSelector::Named(other.to_string()),
        }
    }

    /// Folder that uploads land in, `None` meaning the bucket root
    ///
    /// The synthetic and virtual folders have no physical location, so
    /// uploading "into" them writes to the root.
    pub fn upload_folder(&self) -> Option<&str> {
        match self {
            FolderSelector::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Label used for the folder in UI and now-playing metadata
    pub fn as_str(&self) -> &str {
        match self {
            FolderSelector::All => ALL_FOLDER,
            FolderSelector::Favorites => FAVORITES_FOLDER,
            FolderSelector::Root => "",
            FolderSelector::Named(name) => name,
        }
    }
}

impl fmt::Display for FolderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FolderSelector {
    fn from(value: String) -> Self {
        FolderSelector::parse(&value)
    }
}

impl From<&str> for FolderSelector {
    fn from(value: &str) -> Self {
        FolderSelector::parse(value)
    }
}

impl From<FolderSelector> for String {
    fn from(value: FolderSelector) -> Self {
        value.as_str().to_string()
    }
}

/// Whether a root-level entry name denotes a folder
pub fn is_folder_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('.')
}

/// Store-internal entries (e.g. `.emptyFolderPlaceholder`) are never media
pub fn is_hidden_entry(name: &str) -> bool {
    name.starts_with('.')
}

/// Join a folder prefix and a name into an object path
pub fn join_path(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// Last segment of an object path
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_synthetic_folders() {
        assert_eq!(FolderSelector::parse("All"), FolderSelector::All);
        assert_eq!(FolderSelector::parse("All/Root"), FolderSelector::All);
        assert_eq!(FolderSelector::parse("favorites"), FolderSelector::Favorites);
        assert_eq!(FolderSelector::parse(""), FolderSelector::Root);
        assert_eq!(
            FolderSelector::parse("/2024/"),
            FolderSelector::Named("2024".to_string())
        );
    }

    #[test]
    fn uploads_into_virtual_folders_go_to_root() {
        assert_eq!(FolderSelector::All.upload_folder(), None);
        assert_eq!(FolderSelector::Favorites.upload_folder(), None);
        assert_eq!(FolderSelector::Root.upload_folder(), None);
        assert_eq!(
            FolderSelector::Named("trips".into()).upload_folder(),
            Some("trips")
        );
    }

    #[test]
    fn folder_heuristic() {
        assert!(is_folder_name("2023"));
        assert!(!is_folder_name("cover.jpg"));
        assert!(!is_folder_name(""));
        assert!(is_hidden_entry(".emptyFolderPlaceholder"));
    }

    #[test]
    fn path_helpers() {
        assert_eq!(join_path("", "a.mp3"), "a.mp3");
        assert_eq!(join_path("songs/", "a.mp3"), "songs/a.mp3");
        assert_eq!(file_name("songs/b.mp3"), "b.mp3");
        assert_eq!(file_name("root.mp3"), "root.mp3");
    }

    #[test]
    fn serde_uses_folder_strings() {
        let parsed: FolderSelector = serde_json::from_str("\"All/Root\"").unwrap();
        assert_eq!(parsed, FolderSelector::All);
        let json = serde_json::to_string(&FolderSelector::Named("x".into())).unwrap();
        assert_eq!(json, "\"x\"");
    }
}
