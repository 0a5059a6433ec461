//! Raw object-store listing types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sort order requested from a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Name ascending
    #[default]
    Asc,

    /// Name descending
    Desc,
}

/// Options for one listing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Maximum number of entries returned
    pub limit: usize,

    /// Sort by name
    pub sort: SortOrder,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: 100,
            sort: SortOrder::Asc,
        }
    }
}

/// One entry directly under a listed prefix (file or folder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Entry name relative to the listed prefix
    pub name: String,

    /// Size in bytes, when the store reports it
    pub size: Option<u64>,

    /// Last modification time, when the store reports it
    pub updated_at: Option<DateTime<Utc>>,
}

impl ObjectEntry {
    /// Entry with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            updated_at: None,
        }
    }
}
