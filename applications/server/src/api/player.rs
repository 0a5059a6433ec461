/// Player API routes and the event websocket
use crate::{error::Result, state::AppState};
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    Json,
};
use futures_util::{SinkExt, StreamExt};
use keepsake_playback::{MediaAction, PlayerSnapshot, SinkEvent, TransportController};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;

#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    pub folder: String,
}

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    /// False when a newer load replaced this one first
    pub applied: bool,
    pub player: PlayerSnapshot,
}

/// Body of the shuffle and repeat routes; no value flips the mode
#[derive(Debug, Default, Deserialize)]
pub struct ModeRequest {
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct MediaActionRequest {
    pub action: MediaAction,
}

/// Apply `f` and answer with the resulting snapshot
async fn respond(
    app_state: &AppState,
    f: impl FnOnce(&mut TransportController),
) -> Json<PlayerSnapshot> {
    Json(
        app_state
            .player
            .with(|controller| {
                f(controller);
                controller.snapshot()
            })
            .await,
    )
}

/// GET /api/player
pub async fn get_player(State(app_state): State<AppState>) -> Json<PlayerSnapshot> {
    Json(app_state.player.snapshot().await)
}

/// POST /api/player/load
pub async fn load(
    State(app_state): State<AppState>,
    Json(req): Json<LoadRequest>,
) -> Json<LoadResponse> {
    let applied = app_state
        .player
        .load_folder(&app_state.media, &req.folder)
        .await;
    Json(LoadResponse {
        applied,
        player: app_state.player.snapshot().await,
    })
}

/// POST /api/player/play/:index
pub async fn play_index(
    State(app_state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<PlayerSnapshot>> {
    let snapshot = app_state
        .player
        .with(|controller| -> keepsake_playback::Result<PlayerSnapshot> {
            controller.play_index(index)?;
            Ok(controller.snapshot())
        })
        .await?;
    Ok(Json(snapshot))
}

/// POST /api/player/next
pub async fn next(State(app_state): State<AppState>) -> Json<PlayerSnapshot> {
    respond(&app_state, TransportController::play_next).await
}

/// POST /api/player/previous
pub async fn previous(State(app_state): State<AppState>) -> Json<PlayerSnapshot> {
    respond(&app_state, TransportController::play_prev).await
}

/// POST /api/player/toggle
pub async fn toggle(State(app_state): State<AppState>) -> Json<PlayerSnapshot> {
    respond(&app_state, TransportController::toggle_play_pause).await
}

/// POST /api/player/shuffle
pub async fn shuffle(
    State(app_state): State<AppState>,
    body: Option<Json<ModeRequest>>,
) -> Json<PlayerSnapshot> {
    let enabled = body.and_then(|Json(req)| req.enabled);
    respond(&app_state, |controller| match enabled {
        Some(enabled) => controller.set_shuffle(enabled),
        None => {
            controller.toggle_shuffle();
        }
    })
    .await
}

/// POST /api/player/repeat
pub async fn repeat(
    State(app_state): State<AppState>,
    body: Option<Json<ModeRequest>>,
) -> Json<PlayerSnapshot> {
    let enabled = body.and_then(|Json(req)| req.enabled);
    respond(&app_state, |controller| match enabled {
        Some(enabled) => controller.set_repeat(enabled),
        None => {
            controller.toggle_repeat();
        }
    })
    .await
}

/// POST /api/player/sink - lifecycle report from the client's audio element
pub async fn sink_event(
    State(app_state): State<AppState>,
    Json(event): Json<SinkEvent>,
) -> Json<PlayerSnapshot> {
    respond(&app_state, |controller| controller.handle_sink_event(event)).await
}

/// POST /api/player/media-action
pub async fn media_action(
    State(app_state): State<AppState>,
    Json(req): Json<MediaActionRequest>,
) -> Json<PlayerSnapshot> {
    respond(&app_state, |controller| {
        controller.handle_media_action(req.action);
    })
    .await
}

/// GET /api/player/ws
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

/// Forward portal events to one client; its text frames are sink reports
/// in the same JSON shape as `POST /api/player/sink`
async fn handle_socket(socket: WebSocket, app_state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut events = app_state.player.subscribe();

    tracing::info!("Player websocket connected");

    let send_task = tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Player websocket lagging, events dropped");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            let Ok(json) = serde_json::to_string(&event) else {
                continue;
            };
            if ws_sender.send(Message::Text(json)).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<SinkEvent>(&text) {
                Ok(event) => {
                    app_state
                        .player
                        .with(|controller| controller.handle_sink_event(event))
                        .await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse player message");
                }
            },
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::debug!(error = %e, "Player websocket error");
                break;
            }
            _ => {}
        }
    }

    send_task.abort();
    tracing::info!("Player websocket disconnected");
}
