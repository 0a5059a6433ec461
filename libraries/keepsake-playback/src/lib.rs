//! Keepsake - Playback Control
//!
//! Host-agnostic playlist transport for the song library.
//!
//! This crate provides:
//! - Playlist position with cyclic next/previous
//! - Shuffle (random other track) and repeat (replay current) modes
//! - A sink abstraction the controller pushes sources and play/pause into
//! - Sink feedback: `is_playing` follows confirmed events only
//! - Load tickets so a slow, stale listing cannot replace a newer playlist
//! - Media-session projection ("now playing" metadata and transport actions)
//!
//! # Architecture
//!
//! The controller is a synchronous state machine. It does no I/O itself:
//! audio output and the OS media session are provided via traits, and every
//! observable change is queued as a [`PlaybackEvent`] for the host to drain.
//!
//! # Example
//!
//! ```rust
//! use keepsake_core::{MediaItem, MediaKind};
//! use keepsake_playback::{
//!     NullMediaSession, NullSink, SessionLabels, SinkEvent, TransportController,
//! };
//!
//! let mut player = TransportController::new(
//!     Box::new(NullSink),
//!     Box::new(NullMediaSession),
//!     SessionLabels::default(),
//! );
//!
//! let ticket = player.begin_load();
//! let items = vec![MediaItem {
//!     name: "a.mp3".to_string(),
//!     path: "mix/a.mp3".to_string(),
//!     url: "https://example.com/a.mp3".to_string(),
//!     kind: MediaKind::Audio,
//! }];
//! assert!(player.replace_playlist_if_current(ticket, items, Some("mix".to_string())));
//!
//! player.toggle_play_pause();
//! assert_eq!(player.state().current_index, Some(0));
//! assert!(!player.state().is_playing);
//!
//! player.handle_sink_event(SinkEvent::Playing);
//! assert!(player.state().is_playing);
//! ```

mod controller;
mod error;
mod events;
mod session;
mod shuffle;
mod sink;
pub mod types;

// Public exports
pub use controller::TransportController;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use session::{MediaSession, NullMediaSession};
pub use sink::{AudioSink, NullSink, SinkCommand};
pub use types::{
    Artwork, LoadTicket, MediaAction, NowPlaying, PlaybackState, PlayerSnapshot, SessionLabels,
    SinkEvent,
};
