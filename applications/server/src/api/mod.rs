/// API route modules
pub mod auth;
pub mod diary;
pub mod health;
pub mod libraries;
pub mod objects;
pub mod player;

use crate::{middleware, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Largest accepted upload body
pub const MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

/// Build the full application router
pub fn router(app_state: AppState) -> Router {
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/auth", get(auth::check))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/signup", post(auth::signup))
        .route("/objects/:bucket/*path", get(objects::fetch));

    let upload_routes = Router::new()
        .route("/libraries/:library/upload", put(libraries::upload))
        .route("/diary/media", put(diary::upload_media))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    // Protected routes (session cookie required)
    let protected_routes = Router::new()
        // Libraries
        .route(
            "/libraries/:library/folders",
            get(libraries::list_folders).post(libraries::create_folder),
        )
        .route("/libraries/:library/media", get(libraries::list_media))
        .route(
            "/libraries/:library/objects/*path",
            delete(libraries::delete_object),
        )
        .route(
            "/libraries/:library/favorites",
            get(libraries::list_favorites),
        )
        .route(
            "/libraries/:library/favorites/toggle",
            post(libraries::toggle_favorite),
        )
        // Player
        .route("/player", get(player::get_player))
        .route("/player/load", post(player::load))
        .route("/player/play/:index", post(player::play_index))
        .route("/player/next", post(player::next))
        .route("/player/previous", post(player::previous))
        .route("/player/toggle", post(player::toggle))
        .route("/player/shuffle", post(player::shuffle))
        .route("/player/repeat", post(player::repeat))
        .route("/player/sink", post(player::sink_event))
        .route("/player/media-action", post(player::media_action))
        .route("/player/ws", get(player::ws_handler))
        // Diary
        .route("/diary", get(diary::list_entries).post(diary::create_entry))
        .route("/diary/tags", get(diary::list_tags))
        .route(
            "/diary/:id",
            get(diary::get_entry)
                .put(diary::update_entry)
                .delete(diary::delete_entry),
        )
        .merge(upload_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::require_session,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::basic_gate,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
