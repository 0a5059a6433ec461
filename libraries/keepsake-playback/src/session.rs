//! OS media-session projection
//!
//! Hosts without a media session use [`NullMediaSession`].

use crate::error::Result;
use crate::types::NowPlaying;

/// "Now playing" surface of the operating system or browser
pub trait MediaSession: Send {
    /// Advertise the current track
    fn bind(&mut self, now_playing: &NowPlaying) -> Result<()>;

    /// Remove any advertised track
    fn clear(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullMediaSession;

impl MediaSession for NullMediaSession {
    fn bind(&mut self, _now_playing: &NowPlaying) -> Result<()> {
        Ok(())
    }

    fn clear(&mut self) {}
}
