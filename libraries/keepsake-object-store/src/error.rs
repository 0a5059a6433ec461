//! Error types for object stores.

use keepsake_core::KeepsakeError;
use thiserror::Error;

/// Errors raised by object store implementations and the URL signer.
#[derive(Error, Debug)]
pub enum ObjectStoreError {
    /// HTTP request to a remote store failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Remote store returned an error response
    #[error("Remote store error ({status}): {message}")]
    Remote { status: u16, message: String },

    /// Object does not exist
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Object exists and overwriting was not requested
    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    /// Path is empty, absolute, or escapes its bucket
    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    /// Signed URL token could not be created or verified
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Token is well-formed but issued for another object
    #[error("Token does not grant access to {0}")]
    TokenMismatch(String),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a remote response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for object store operations.
pub type Result<T> = std::result::Result<T, ObjectStoreError>;

impl From<ObjectStoreError> for KeepsakeError {
    fn from(err: ObjectStoreError) -> Self {
        match err {
            ObjectStoreError::NotFound(path) => KeepsakeError::not_found("Object", path),
            ObjectStoreError::AlreadyExists(path) => KeepsakeError::Duplicate(path),
            ObjectStoreError::InvalidPath(_) => KeepsakeError::InvalidInput(err.to_string()),
            ObjectStoreError::Token(_) | ObjectStoreError::TokenMismatch(_) => {
                KeepsakeError::PermissionDenied(err.to_string())
            }
            ObjectStoreError::Request(_) => KeepsakeError::Network(err.to_string()),
            ObjectStoreError::Io(io) => KeepsakeError::Io(io),
            other => KeepsakeError::ObjectStore(other.to_string()),
        }
    }
}
