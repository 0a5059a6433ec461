/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keepsake_core::KeepsakeError;
use keepsake_playback::PlaybackError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Keepsake(#[from] KeepsakeError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<keepsake_storage::StorageError> for ServerError {
    fn from(err: keepsake_storage::StorageError) -> Self {
        ServerError::Keepsake(err.into())
    }
}

impl From<keepsake_object_store::ObjectStoreError> for ServerError {
    fn from(err: keepsake_object_store::ObjectStoreError) -> Self {
        ServerError::Keepsake(err.into())
    }
}

impl ServerError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Keepsake(e) => match e {
                KeepsakeError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
                KeepsakeError::Duplicate(_) => (StatusCode::CONFLICT, e.to_string()),
                KeepsakeError::InvalidInput(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                KeepsakeError::PermissionDenied(_) => (StatusCode::FORBIDDEN, e.to_string()),
                KeepsakeError::Network(_) | KeepsakeError::ObjectStore(_) => {
                    tracing::error!("Object store error: {:?}", e);
                    (StatusCode::BAD_GATEWAY, "Object store error".to_string())
                }
                _ => {
                    tracing::error!("Storage error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Storage error".to_string(),
                    )
                }
            },
            ServerError::Playback(e) => match e {
                PlaybackError::IndexOutOfBounds { .. } | PlaybackError::EmptyPlaylist => {
                    (StatusCode::BAD_REQUEST, e.to_string())
                }
                PlaybackError::Session(_) => {
                    tracing::error!("Playback error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Playback error".to_string(),
                    )
                }
            },
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string())
            }
            ServerError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Bcrypt(e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ServerError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_core_errors_map_to_client_statuses() {
        assert_eq!(
            status_of(KeepsakeError::not_found("Entry", "x").into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(KeepsakeError::Duplicate("email".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(KeepsakeError::invalid_input("bad").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(KeepsakeError::storage("disk").into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(KeepsakeError::object_store("down").into()),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_playback_index_error_is_bad_request() {
        let err = PlaybackError::IndexOutOfBounds { index: 4, len: 2 };
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_details_are_not_leaked() {
        let (_, message) = ServerError::Internal("secret path /etc".into()).status_and_message();
        assert_eq!(message, "Internal server error");
    }
}
