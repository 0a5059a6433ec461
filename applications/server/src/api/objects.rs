/// Signed object download API route
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use keepsake_core::Library;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SignedQuery {
    pub token: String,
}

/// GET /api/objects/:bucket/*path?token=
///
/// Serves objects of the local object store. Only reachable with a token
/// issued for exactly this bucket and path.
pub async fn fetch(
    State(app_state): State<AppState>,
    Path((bucket, path)): Path<(String, String)>,
    Query(query): Query<SignedQuery>,
) -> Result<Response> {
    let store = app_state
        .local_objects
        .as_ref()
        .ok_or_else(|| ServerError::NotFound("Object".to_string()))?;
    let library = Library::from_bucket(&bucket)
        .ok_or_else(|| ServerError::NotFound(format!("Bucket {bucket}")))?;

    store
        .signer()
        .verify(&bucket, &path, &query.token)
        .map_err(|e| {
            tracing::debug!(bucket = %bucket, path = %path, error = %e, "Rejected object token");
            ServerError::Auth("Invalid or expired link".to_string())
        })?;

    let data = store.get(library, &path).await?;
    let content_type = mime_guess::from_path(&path).first_or_octet_stream();

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CACHE_CONTROL, "private, max-age=3600".to_string()),
        ],
        data,
    )
        .into_response())
}
