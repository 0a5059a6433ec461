//! Core types for transport control

use keepsake_core::MediaItem;
use serde::{Deserialize, Serialize};

/// Transport state owned by the controller
///
/// `is_playing` reflects what the sink last confirmed, never what was
/// merely requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Playlist position of the current track
    pub current_index: Option<usize>,

    /// Sink confirmed audible playback
    pub is_playing: bool,

    /// Next/previous pick a random other track
    pub is_shuffle: bool,

    /// A finished track restarts instead of advancing
    pub is_repeat: bool,
}

/// Playback lifecycle reports coming back from the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum SinkEvent {
    /// Audio started or resumed
    Playing,

    /// Audio paused
    Paused,

    /// Current track reached its end
    Ended,

    /// Play request was rejected (e.g. autoplay policy) or decoding failed
    Failed {
        #[serde(default)]
        reason: Option<String>,
    },
}

/// Transport controls exposed by the OS media session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaAction {
    Play,
    Pause,
    PreviousTrack,
    NextTrack,
}

/// Cover image advertised to the media session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// "Now playing" metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub artwork: Vec<Artwork>,
}

/// Fixed labels used when projecting a track into the media session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLabels {
    /// Artist shown for every track
    pub artist: String,

    /// Album shown when the playlist is not a single named folder
    pub fallback_album: String,

    pub artwork: Vec<Artwork>,
}

impl Default for SessionLabels {
    fn default() -> Self {
        Self {
            artist: "My Private Songs".to_string(),
            fallback_album: "Playlist".to_string(),
            artwork: vec![Artwork {
                src: "/music-icon.png".to_string(),
                sizes: "512x512".to_string(),
                mime_type: "image/png".to_string(),
            }],
        }
    }
}

impl SessionLabels {
    /// Metadata for `item` from a playlist loaded from `album`
    pub fn now_playing(&self, item: &MediaItem, album: Option<&str>) -> NowPlaying {
        NowPlaying {
            title: item.name.clone(),
            artist: self.artist.clone(),
            album: album
                .filter(|a| !a.is_empty())
                .unwrap_or(self.fallback_album.as_str())
                .to_string(),
            artwork: self.artwork.clone(),
        }
    }
}

/// Guard against an older listing overwriting a newer playlist
///
/// Issued by [`crate::TransportController::begin_load`]; only the ticket
/// from the most recent call is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub(crate) u64);

impl LoadTicket {
    pub fn epoch(&self) -> u64 {
        self.0
    }
}

/// Everything a client needs to render the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    #[serde(flatten)]
    pub state: PlaybackState,

    /// Folder the playlist was loaded from
    pub album: Option<String>,

    pub playlist: Vec<MediaItem>,

    pub current: Option<MediaItem>,
}
