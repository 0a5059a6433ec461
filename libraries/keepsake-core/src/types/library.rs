//! Media libraries and the object-store buckets behind them

use crate::error::KeepsakeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A media library backed by one object-store bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Library {
    /// Photo and video gallery
    Photos,

    /// Private song collection
    Songs,

    /// Images and videos attached to diary entries
    DiaryMedia,
}

impl Library {
    /// Every library, in display order
    pub const ALL: [Library; 3] = [Library::Photos, Library::Songs, Library::DiaryMedia];

    /// Name of the bucket holding this library's objects
    pub fn bucket(&self) -> &'static str {
        match self {
            Library::Photos => "photos",
            Library::Songs => "songs",
            Library::DiaryMedia => "diary_media",
        }
    }

    /// Look a library up by its bucket name
    pub fn from_bucket(bucket: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.bucket() == bucket)
    }

    /// Whether every object in this library is treated as audio
    pub fn is_audio(&self) -> bool {
        matches!(self, Library::Songs)
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bucket())
    }
}

impl FromStr for Library {
    type Err = KeepsakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "photos" | "gallery" => Ok(Library::Photos),
            "songs" | "music" => Ok(Library::Songs),
            "diary_media" | "diary-media" => Ok(Library::DiaryMedia),
            other => Err(KeepsakeError::invalid_input(format!(
                "unknown library: {other}"
            ))),
        }
    }
}
