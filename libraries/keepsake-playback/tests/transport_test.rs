//! Transport scenarios end to end: controller, sink commands, media session

use keepsake_core::{MediaItem, MediaKind};
use keepsake_playback::{
    AudioSink, MediaSession, NowPlaying, NullMediaSession, PlaybackError, PlaybackEvent,
    SessionLabels, SinkCommand, SinkEvent, TransportController,
};
use std::sync::{Arc, Mutex};

fn song(path: &str) -> MediaItem {
    MediaItem {
        name: path.rsplit('/').next().unwrap().to_string(),
        path: path.to_string(),
        url: format!("https://signed.test/{path}"),
        kind: MediaKind::Audio,
    }
}

fn two_songs() -> Vec<MediaItem> {
    vec![song("songs/a.mp3"), song("songs/b.mp3")]
}

/// Sink that records commands; clones share one log
#[derive(Clone, Default)]
struct RecordingSink {
    commands: Arc<Mutex<Vec<SinkCommand>>>,
}

impl RecordingSink {
    fn new() -> Self {
        Self::default()
    }

    fn take(&self) -> Vec<SinkCommand> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }
}

impl AudioSink for RecordingSink {
    fn send(&mut self, command: SinkCommand) {
        self.commands.lock().unwrap().push(command);
    }
}

fn player(sink: &RecordingSink) -> TransportController {
    TransportController::new(
        Box::new(sink.clone()),
        Box::new(NullMediaSession),
        SessionLabels::default(),
    )
}

/// Media session that records what it was asked to show
#[derive(Clone, Default)]
struct RecordingSession {
    bound: Arc<Mutex<Vec<NowPlaying>>>,
    cleared: Arc<Mutex<usize>>,
    fail: bool,
}

impl MediaSession for RecordingSession {
    fn bind(&mut self, now_playing: &NowPlaying) -> keepsake_playback::Result<()> {
        if self.fail {
            return Err(PlaybackError::Session("unsupported".to_string()));
        }
        self.bound.lock().unwrap().push(now_playing.clone());
        Ok(())
    }

    fn clear(&mut self) {
        *self.cleared.lock().unwrap() += 1;
    }
}

#[test]
fn ended_advances_without_repeat() {
    let sink = RecordingSink::new();
    let mut player = player(&sink);
    player.replace_playlist(two_songs(), None);

    player.play_index(0).unwrap();
    player.on_track_ended();
    assert_eq!(player.state().current_index, Some(1));
}

#[test]
fn ended_replays_with_repeat() {
    let sink = RecordingSink::new();
    let mut player = player(&sink);
    player.replace_playlist(two_songs(), None);
    player.set_repeat(true);

    player.play_index(0).unwrap();
    sink.take();
    player.on_track_ended();

    assert_eq!(player.state().current_index, Some(0));
    assert_eq!(
        sink.take(),
        vec![
            SinkCommand::Load {
                url: "https://signed.test/songs/a.mp3".to_string()
            },
            SinkCommand::Play
        ]
    );
}

#[test]
fn sink_ended_event_drives_track_end_policy() {
    let sink = RecordingSink::new();
    let mut player = player(&sink);
    player.replace_playlist(two_songs(), None);

    player.play_index(1).unwrap();
    player.handle_sink_event(SinkEvent::Playing);
    player.handle_sink_event(SinkEvent::Ended);

    // Wraps around to the first track and waits for confirmation
    assert_eq!(player.state().current_index, Some(0));
    assert!(!player.state().is_playing);
}

#[test]
fn toggle_on_idle_starts_first_track() {
    let sink = RecordingSink::new();
    let mut player = player(&sink);
    player.replace_playlist(two_songs(), None);

    player.toggle_play_pause();
    assert_eq!(player.state().current_index, Some(0));

    player.handle_sink_event(SinkEvent::Playing);
    assert!(player.state().is_playing);
}

#[test]
fn toggle_on_empty_playlist_does_nothing() {
    let sink = RecordingSink::new();
    let mut player = player(&sink);
    player.toggle_play_pause();

    assert_eq!(player.state().current_index, None);
    assert!(sink.take().is_empty());
}

#[test]
fn replacing_playlist_resets_index_and_stops_sink() {
    let sink = RecordingSink::new();
    let mut player = player(&sink);
    player.replace_playlist(
        vec![song("a/1.mp3"), song("a/2.mp3"), song("a/3.mp3")],
        Some("a".to_string()),
    );
    player.play_index(2).unwrap();
    player.handle_sink_event(SinkEvent::Playing);
    sink.take();

    player.replace_playlist(vec![song("b/1.mp3")], Some("b".to_string()));

    assert_eq!(player.state().current_index, None);
    assert!(!player.state().is_playing);
    assert_eq!(sink.take(), vec![SinkCommand::Stop]);
    assert_eq!(player.album(), Some("b"));
}

#[test]
fn stale_listing_is_discarded() {
    let sink = RecordingSink::new();
    let mut player = player(&sink);

    let slow = player.begin_load();
    let fast = player.begin_load();

    assert!(player.replace_playlist_if_current(fast, vec![song("new/1.mp3")], Some("new".to_string())));
    assert!(!player.replace_playlist_if_current(slow, two_songs(), None));

    assert_eq!(player.playlist().len(), 1);
    assert_eq!(player.album(), Some("new"));
}

#[test]
fn session_bound_only_on_confirmed_playback() {
    let session = RecordingSession::default();
    let mut player = TransportController::new(
        Box::new(RecordingSink::new()),
        Box::new(session.clone()),
        SessionLabels::default(),
    );
    player.replace_playlist(two_songs(), Some("2024".to_string()));

    player.play_index(1).unwrap();
    assert!(session.bound.lock().unwrap().is_empty());

    player.handle_sink_event(SinkEvent::Playing);
    let bound = session.bound.lock().unwrap().clone();
    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0].title, "b.mp3");
    assert_eq!(bound[0].artist, "My Private Songs");
    assert_eq!(bound[0].album, "2024");
    assert_eq!(bound[0].artwork[0].src, "/music-icon.png");
}

#[test]
fn session_failure_does_not_affect_playback() {
    let session = RecordingSession {
        fail: true,
        ..RecordingSession::default()
    };
    let mut player = TransportController::new(
        Box::new(RecordingSink::new()),
        Box::new(session),
        SessionLabels::default(),
    );
    player.replace_playlist(two_songs(), None);

    player.play_index(0).unwrap();
    player.handle_sink_event(SinkEvent::Playing);
    assert!(player.state().is_playing);
}

#[test]
fn events_describe_each_change() {
    let sink = RecordingSink::new();
    let mut player = player(&sink);
    player.replace_playlist(two_songs(), None);
    player.play_index(0).unwrap();
    player.handle_sink_event(SinkEvent::Playing);

    let events = player.drain_events();
    assert!(matches!(events[0], PlaybackEvent::PlaylistReplaced { len: 2, .. }));
    assert!(events.iter().any(|e| matches!(
        e,
        PlaybackEvent::TrackChanged { index: 0, previous_index: None, .. }
    )));
    assert!(matches!(
        events.last(),
        Some(PlaybackEvent::StateChanged { state }) if state.is_playing
    ));
    assert!(player.drain_events().is_empty());
}

#[test]
fn snapshot_serializes_flat_state() {
    let sink = RecordingSink::new();
    let mut player = player(&sink);
    player.replace_playlist(two_songs(), Some("mix".to_string()));
    player.play_index(1).unwrap();

    let json = serde_json::to_value(player.snapshot()).unwrap();
    assert_eq!(json["current_index"], 1);
    assert_eq!(json["is_playing"], false);
    assert_eq!(json["album"], "mix");
    assert_eq!(json["current"]["path"], "songs/b.mp3");
    assert_eq!(json["playlist"].as_array().unwrap().len(), 2);
}
