//! Diary entries and the media attached to them

use super::ids::DiaryEntryId;
use super::media::MediaKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Media attached to a diary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryMedia {
    /// Original file name
    pub name: String,

    /// Object path in the diary media bucket
    pub path: String,

    /// Signed URL captured at upload time
    pub url: String,

    /// Image or video
    #[serde(rename = "type")]
    pub kind: MediaKind,

    /// Free-form tags on the media item
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A diary entry
///
/// `content` is the editor document as JSON and is stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    /// Entry ID
    pub id: DiaryEntryId,

    /// Entry title
    pub title: String,

    /// Editor document
    pub content: serde_json::Value,

    /// Attached media
    pub media: Vec<DiaryMedia>,

    /// Entry tags
    pub tags: Vec<String>,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Data for a new diary entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDiaryEntry {
    /// Entry title
    pub title: String,

    /// Editor document
    #[serde(default)]
    pub content: serde_json::Value,

    /// Attached media
    #[serde(default)]
    pub media: Vec<DiaryMedia>,

    /// Entry tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial update of a diary entry; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDiaryEntry {
    /// New title
    pub title: Option<String>,

    /// New editor document
    pub content: Option<serde_json::Value>,

    /// Replacement media list
    pub media: Option<Vec<DiaryMedia>>,

    /// Replacement tags
    pub tags: Option<Vec<String>>,
}

impl UpdateDiaryEntry {
    /// Whether the update changes anything
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.media.is_none() && self.tags.is_none()
    }
}

/// Diary search filter
///
/// A keyword matches title or content text (case-insensitive substring) or
/// equals one of the entry's tags. A tag filter requires exact membership.
/// Both may be combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryQuery {
    /// Free-text keyword
    pub keyword: Option<String>,

    /// Required tag
    pub tag: Option<String>,
}

impl DiaryQuery {
    /// Query by keyword
    pub fn keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            tag: None,
        }
    }

    /// Query by tag
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            keyword: None,
            tag: Some(tag.into()),
        }
    }
}
