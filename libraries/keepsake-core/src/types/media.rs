//! Listed media items and their classification

use super::library::Library;
use serde::{Deserialize, Serialize};

/// File extensions treated as video in the gallery
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "webm"];

/// Kind of media an object holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image
    Image,

    /// Video clip
    Video,

    /// Audio track
    Audio,
}

impl MediaKind {
    /// Classify an object by library and file name
    ///
    /// Everything in the song library is audio regardless of extension.
    /// Elsewhere a name ending in a known video extension (case-insensitive)
    /// is a video and anything else an image.
    pub fn classify(library: Library, name: &str) -> Self {
        if library.is_audio() {
            return MediaKind::Audio;
        }

        let is_video = name
            .rsplit_once('.')
            .map(|(_, ext)| {
                VIDEO_EXTENSIONS
                    .iter()
                    .any(|v| v.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false);

        if is_video {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    /// Classify a diary upload from its MIME content type
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("video") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// A listed object resolved to a time-limited access URL
///
/// Created fresh on every listing; the URL expires independently of the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// File name (last path segment)
    pub name: String,

    /// Full object path inside the bucket
    pub path: String,

    /// Signed access URL
    pub url: String,

    /// Image, video or audio
    pub kind: MediaKind,
}
