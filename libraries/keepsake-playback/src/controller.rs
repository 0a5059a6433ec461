//! Transport controller - playlist position and play/pause orchestration
//!
//! The controller owns the playlist and the transport state, and is the only
//! writer of the sink. It never assumes a request succeeded: `is_playing`
//! flips only when the sink reports back via [`SinkEvent`].

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    session::MediaSession,
    shuffle::pick_other,
    sink::AudioSink,
    types::{LoadTicket, MediaAction, PlaybackState, PlayerSnapshot, SessionLabels, SinkEvent},
};
use keepsake_core::MediaItem;
use tracing::{debug, warn};

/// Playlist transport state machine
pub struct TransportController {
    playlist: Vec<MediaItem>,
    album: Option<String>,
    state: PlaybackState,

    sink: Box<dyn AudioSink>,
    session: Box<dyn MediaSession>,
    labels: SessionLabels,

    // Most recent ticket handed out by begin_load
    load_epoch: u64,

    // Event queue for client synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl TransportController {
    pub fn new(
        sink: Box<dyn AudioSink>,
        session: Box<dyn MediaSession>,
        labels: SessionLabels,
    ) -> Self {
        Self {
            playlist: Vec::new(),
            album: None,
            state: PlaybackState::default(),
            sink,
            session,
            labels,
            load_epoch: 0,
            pending_events: Vec::new(),
        }
    }

    // ===== Queries =====

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn playlist(&self) -> &[MediaItem] {
        &self.playlist
    }

    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    pub fn current_item(&self) -> Option<&MediaItem> {
        self.state.current_index.and_then(|i| self.playlist.get(i))
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            state: self.state,
            album: self.album.clone(),
            playlist: self.playlist.clone(),
            current: self.current_item().cloned(),
        }
    }

    // ===== Playlist =====

    /// Start a playlist load; only the latest ticket may apply its result
    pub fn begin_load(&mut self) -> LoadTicket {
        self.load_epoch += 1;
        LoadTicket(self.load_epoch)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.load_epoch
    }

    /// Apply a listing if no newer load started since `ticket` was issued
    ///
    /// Returns whether the playlist was replaced.
    pub fn replace_playlist_if_current(
        &mut self,
        ticket: LoadTicket,
        items: Vec<MediaItem>,
        album: Option<String>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.load_epoch,
                "Discarding stale playlist"
            );
            return false;
        }
        self.replace_playlist(items, album);
        true
    }

    /// Replace the playlist, stopping the sink and resetting position
    pub fn replace_playlist(&mut self, items: Vec<MediaItem>, album: Option<String>) {
        self.sink.stop();
        self.session.clear();

        self.playlist = items;
        self.album = album;
        self.state.current_index = None;
        self.state.is_playing = false;

        self.pending_events.push(PlaybackEvent::PlaylistReplaced {
            len: self.playlist.len(),
            album: self.album.clone(),
        });
        self.emit_state_changed();
    }

    /// Remove one item, keeping the current index pointing at the same track
    pub fn remove_at(&mut self, index: usize) -> Option<MediaItem> {
        if index >= self.playlist.len() {
            return None;
        }
        let removed = self.playlist.remove(index);

        match self.state.current_index {
            Some(current) if current == index => {
                self.sink.stop();
                self.session.clear();
                self.state.current_index = None;
                self.state.is_playing = false;
            }
            Some(current) if current > index => {
                self.state.current_index = Some(current - 1);
            }
            _ => {}
        }

        self.pending_events.push(PlaybackEvent::ItemRemoved {
            index,
            path: removed.path.clone(),
        });
        self.emit_state_changed();
        Some(removed)
    }

    /// Remove the item with `path`, if present
    pub fn remove_path(&mut self, path: &str) -> Option<MediaItem> {
        let index = self.playlist.iter().position(|item| item.path == path)?;
        self.remove_at(index)
    }

    // ===== Transport =====

    /// Load and request playback of `items[index]`
    pub fn play_index(&mut self, index: usize) -> Result<()> {
        let len = self.playlist.len();
        if index >= len {
            return Err(PlaybackError::IndexOutOfBounds { index, len });
        }
        self.start_track(index);
        Ok(())
    }

    /// Advance: random other track in shuffle mode, else cyclic
    pub fn play_next(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        let next = if self.state.is_shuffle && len > 1 {
            pick_other(&mut rand::thread_rng(), len, self.state.current_index)
        } else {
            match self.state.current_index {
                None => 0,
                Some(current) => (current + 1) % len,
            }
        };
        self.start_track(next);
    }

    /// Go back: random other track in shuffle mode, else cyclic
    pub fn play_prev(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        let prev = if self.state.is_shuffle && len > 1 {
            pick_other(&mut rand::thread_rng(), len, self.state.current_index)
        } else {
            match self.state.current_index {
                None => len - 1,
                Some(current) => (current + len - 1) % len,
            }
        };
        self.start_track(prev);
    }

    /// Start the first track, or ask the sink to pause/resume
    pub fn toggle_play_pause(&mut self) {
        match self.state.current_index {
            None => {
                if !self.playlist.is_empty() {
                    self.start_track(0);
                }
            }
            Some(_) if self.state.is_playing => self.sink.pause(),
            Some(_) => self.sink.play(),
        }
    }

    /// Repeat the current track or move on
    pub fn on_track_ended(&mut self) {
        match self.state.current_index {
            Some(current) if self.state.is_repeat && current < self.playlist.len() => {
                self.start_track(current);
            }
            _ => self.play_next(),
        }
    }

    // ===== Modes =====

    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.state.is_shuffle != enabled {
            self.state.is_shuffle = enabled;
            self.emit_mode_changed();
        }
    }

    pub fn set_repeat(&mut self, enabled: bool) {
        if self.state.is_repeat != enabled {
            self.state.is_repeat = enabled;
            self.emit_mode_changed();
        }
    }

    pub fn toggle_shuffle(&mut self) -> bool {
        self.set_shuffle(!self.state.is_shuffle);
        self.state.is_shuffle
    }

    pub fn toggle_repeat(&mut self) -> bool {
        self.set_repeat(!self.state.is_repeat);
        self.state.is_repeat
    }

    // ===== Feedback =====

    /// Apply a lifecycle report from the sink
    pub fn handle_sink_event(&mut self, event: SinkEvent) {
        match event {
            SinkEvent::Playing if self.state.current_index.is_none() => {
                debug!("Ignoring playing report without a current track");
            }
            SinkEvent::Playing => {
                self.set_playing(true);
                self.bind_session();
            }
            SinkEvent::Paused => self.set_playing(false),
            SinkEvent::Ended => {
                self.set_playing(false);
                self.on_track_ended();
            }
            SinkEvent::Failed { reason } => {
                warn!(
                    reason = reason.as_deref().unwrap_or("unknown"),
                    index = ?self.state.current_index,
                    "Sink failed to play"
                );
                self.set_playing(false);
            }
        }
    }

    /// Dispatch a media-session transport control
    pub fn handle_media_action(&mut self, action: MediaAction) {
        match action {
            MediaAction::Play => {
                let index = self.state.current_index.unwrap_or(0);
                if let Err(e) = self.play_index(index) {
                    debug!(error = %e, "Ignoring play action");
                }
            }
            MediaAction::Pause => self.sink.pause(),
            MediaAction::PreviousTrack => self.play_prev(),
            MediaAction::NextTrack => self.play_next(),
        }
    }

    /// Drain pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internals =====

    fn start_track(&mut self, index: usize) {
        let previous_index = self.state.current_index;
        let item = self.playlist[index].clone();

        self.state.current_index = Some(index);
        // Loading a new source silences the old one until the sink confirms
        self.state.is_playing = false;

        self.sink.load(&item.url);
        self.sink.play();

        self.pending_events.push(PlaybackEvent::TrackChanged {
            index,
            item,
            previous_index,
        });
        self.emit_state_changed();
    }

    fn set_playing(&mut self, playing: bool) {
        if self.state.is_playing != playing {
            self.state.is_playing = playing;
            self.emit_state_changed();
        }
    }

    fn bind_session(&mut self) {
        let Some(item) = self.current_item() else {
            return;
        };
        let now_playing = self.labels.now_playing(item, self.album.as_deref());
        if let Err(e) = self.session.bind(&now_playing) {
            debug!(error = %e, "Media session bind failed");
        }
    }

    fn emit_state_changed(&mut self) {
        self.pending_events
            .push(PlaybackEvent::StateChanged { state: self.state });
    }

    fn emit_mode_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::ModeChanged {
            is_shuffle: self.state.is_shuffle,
            is_repeat: self.state.is_repeat,
        });
    }
}
