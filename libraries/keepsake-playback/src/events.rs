//! Playback Events
//!
//! Every observable controller change is queued as an event and drained by
//! the host, which forwards them to connected clients.

use crate::types::PlaybackState;
use keepsake_core::MediaItem;
use serde::{Deserialize, Serialize};

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Index or confirmed playing flag changed
    StateChanged { state: PlaybackState },

    /// A track was pushed into the sink
    TrackChanged {
        index: usize,
        item: MediaItem,
        previous_index: Option<usize>,
    },

    /// Shuffle or repeat toggled
    ModeChanged { is_shuffle: bool, is_repeat: bool },

    /// Playlist contents changed wholesale
    PlaylistReplaced { len: usize, album: Option<String> },

    /// One item left the playlist
    ItemRemoved { index: usize, path: String },
}
