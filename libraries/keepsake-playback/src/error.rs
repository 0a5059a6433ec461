//! Error types for transport control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Index does not address a playlist item
    #[error("Index out of bounds: {index} (playlist has {len} items)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Playlist is empty
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// Media session rejected metadata
    #[error("Media session error: {0}")]
    Session(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
