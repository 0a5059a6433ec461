//! Server-owned transport controller
//!
//! The process holds one controller. Its sink and media session are
//! projected onto the portal event channel, so the browser tab holding the
//! audio element receives `load`/`play` commands and reports back through
//! the sink endpoint.

use crate::services::events::{publish, PortalEvent};
use keepsake_core::{FolderSelector, Library};
use keepsake_media::MediaService;
use keepsake_playback::{
    AudioSink, MediaSession, NowPlaying, PlayerSnapshot, SessionLabels, SinkCommand,
    TransportController,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

/// Sink that forwards commands to websocket clients
pub struct BroadcastSink {
    events: broadcast::Sender<PortalEvent>,
}

impl BroadcastSink {
    pub fn new(events: broadcast::Sender<PortalEvent>) -> Self {
        Self { events }
    }
}

impl AudioSink for BroadcastSink {
    fn send(&mut self, command: SinkCommand) {
        publish(&self.events, PortalEvent::Sink(command));
    }
}

/// Media session mirrored to websocket clients
pub struct BroadcastSession {
    events: broadcast::Sender<PortalEvent>,
}

impl BroadcastSession {
    pub fn new(events: broadcast::Sender<PortalEvent>) -> Self {
        Self { events }
    }
}

impl MediaSession for BroadcastSession {
    fn bind(&mut self, now_playing: &NowPlaying) -> keepsake_playback::Result<()> {
        publish(&self.events, PortalEvent::NowPlaying(Some(now_playing.clone())));
        Ok(())
    }

    fn clear(&mut self) {
        publish(&self.events, PortalEvent::NowPlaying(None));
    }
}

pub struct PlayerService {
    controller: Mutex<TransportController>,
    events: broadcast::Sender<PortalEvent>,
}

impl PlayerService {
    pub fn new(labels: SessionLabels, events: broadcast::Sender<PortalEvent>) -> Self {
        let controller = TransportController::new(
            Box::new(BroadcastSink::new(events.clone())),
            Box::new(BroadcastSession::new(events.clone())),
            labels,
        );
        Self {
            controller: Mutex::new(controller),
            events,
        }
    }

    /// Run `f` against the controller, then publish what it queued
    pub async fn with<R>(&self, f: impl FnOnce(&mut TransportController) -> R) -> R {
        let mut controller = self.controller.lock().await;
        let result = f(&mut controller);
        for event in controller.drain_events() {
            publish(&self.events, PortalEvent::Playback(event));
        }
        result
    }

    pub async fn snapshot(&self) -> PlayerSnapshot {
        self.controller.lock().await.snapshot()
    }

    /// Replace the playlist with a song folder listing
    ///
    /// The lock is not held while listing; if another load starts in the
    /// meantime this result is dropped and `false` returned.
    pub async fn load_folder(&self, media: &MediaService, folder: &str) -> bool {
        let selector = FolderSelector::parse(folder);
        let ticket = self.with(TransportController::begin_load).await;

        let items = media.list_media(Library::Songs, &selector).await;
        let len = items.len();
        let album = Some(folder.to_string());

        let applied = self
            .with(|controller| controller.replace_playlist_if_current(ticket, items, album))
            .await;
        if applied {
            info!(folder = %folder, tracks = len, "Loaded playlist");
        } else {
            debug!(folder = %folder, "Playlist load superseded");
        }
        applied
    }

    /// Drop a deleted song from the playlist
    pub async fn forget_path(&self, path: &str) {
        self.with(|controller| controller.remove_path(path)).await;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PortalEvent> {
        self.events.subscribe()
    }
}
