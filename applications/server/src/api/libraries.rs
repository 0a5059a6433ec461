/// Media library API routes
use crate::{
    error::{Result, ServerError},
    services::events::{publish, PortalEvent},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use keepsake_core::{FavoriteRef, FolderSelector, Library, MediaItem, ALL_FOLDER};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FolderQuery {
    #[serde(default = "default_folder")]
    pub folder: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub folder: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleFavoriteRequest {
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub favorite: bool,
}

fn default_folder() -> String {
    ALL_FOLDER.to_string()
}

fn library(name: &str) -> Result<Library> {
    name.parse::<Library>()
        .map_err(|_| ServerError::NotFound(format!("Library {name}")))
}

/// GET /api/libraries/:library/folders
pub async fn list_folders(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<String>>> {
    let library = library(&name)?;
    Ok(Json(app_state.media.folders(library).await))
}

/// POST /api/libraries/:library/folders
pub async fn create_folder(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<CreateFolderRequest>,
) -> Result<StatusCode> {
    let library = library(&name)?;
    app_state.media.create_folder(library, &req.name).await?;
    Ok(StatusCode::CREATED)
}

/// GET /api/libraries/:library/media?folder=All
pub async fn list_media(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<FolderQuery>,
) -> Result<Json<Vec<MediaItem>>> {
    let library = library(&name)?;
    let selector = FolderSelector::parse(&query.folder);
    Ok(Json(app_state.media.list_media(library, &selector).await))
}

/// PUT /api/libraries/:library/upload?folder=&name=
pub async fn upload(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<UploadQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let library = library(&name)?;
    if body.is_empty() {
        return Err(ServerError::BadRequest("Empty upload".to_string()));
    }

    let selector = FolderSelector::parse(&query.folder);
    let path = app_state
        .media
        .upload(library, &selector, &query.name, body.to_vec())
        .await?;

    Ok((StatusCode::CREATED, Json(UploadResponse { path })))
}

/// DELETE /api/libraries/:library/objects/*path
pub async fn delete_object(
    State(app_state): State<AppState>,
    Path((name, path)): Path<(String, String)>,
) -> Result<StatusCode> {
    let library = library(&name)?;
    app_state.media.delete(library, &path).await?;

    if library.is_audio() {
        app_state.player.forget_path(&path).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/libraries/:library/favorites
pub async fn list_favorites(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<FavoriteRef>>> {
    let library = library(&name)?;
    Ok(Json(app_state.media.favorites().refs(library).await?))
}

/// POST /api/libraries/:library/favorites/toggle
pub async fn toggle_favorite(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
    Json(req): Json<ToggleFavoriteRequest>,
) -> Result<Json<FavoriteResponse>> {
    let library = library(&name)?;
    if req.path.trim().is_empty() {
        return Err(ServerError::BadRequest("path is required".to_string()));
    }

    let favorite = app_state
        .media
        .favorites()
        .toggle(library, &req.path, req.name.as_deref())
        .await?;

    publish(
        &app_state.events,
        PortalEvent::FavoritesChanged {
            library,
            path: req.path,
            favorite,
        },
    );
    Ok(Json(FavoriteResponse { favorite }))
}
