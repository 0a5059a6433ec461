/// Business logic services
pub mod auth;
pub mod events;
pub mod player;

pub use auth::AuthService;
pub use events::PortalEvent;
pub use player::PlayerService;
