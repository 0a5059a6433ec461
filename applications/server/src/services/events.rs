/// Events pushed to connected clients over the player websocket
use keepsake_core::Library;
use keepsake_playback::{NowPlaying, PlaybackEvent, SinkCommand};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Capacity of the portal event channel; slow clients skip what they miss
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum PortalEvent {
    /// Command for the client-side audio element
    Sink(SinkCommand),

    /// Media-session metadata; `None` clears it
    NowPlaying(Option<NowPlaying>),

    /// Controller state change
    Playback(PlaybackEvent),

    FavoritesChanged {
        library: Library,
        path: String,
        favorite: bool,
    },
}

pub fn channel() -> broadcast::Sender<PortalEvent> {
    broadcast::channel(EVENT_CHANNEL_CAPACITY).0
}

/// Send to every subscriber; having none is not an error
pub fn publish(events: &broadcast::Sender<PortalEvent>, event: PortalEvent) {
    if events.send(event).is_err() {
        tracing::trace!("No event subscribers");
    }
}
