/// Request middleware
pub mod auth;

pub use auth::{basic_gate, require_session, Session};
