//! Keepsake Server Library
//!
//! Personal media portal: gallery and song libraries over object storage,
//! a server-side music player, a diary, and cookie-session authentication.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::router;
pub use config::{ServerConfig, StorageBackend};
pub use error::{Result, ServerError};
pub use services::{auth::AuthService, player::PlayerService, PortalEvent};
pub use state::{AppState, Backends};
