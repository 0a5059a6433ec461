use serde::{Deserialize, Serialize};

/// A favorited object, keyed by its path within a library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRef {
    /// Object path
    pub path: String,

    /// Display name captured when the favorite was added
    pub name: Option<String>,
}

impl FavoriteRef {
    /// Favorite for a path with no display name
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
        }
    }

    /// Favorite for a path with a display name
    pub fn named(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: Some(name.into()),
        }
    }
}
