//! Keepsake Storage
//!
//! `SQLite` persistence for the parts of the portal that live in a relational
//! store: favorites, diary entries and signup accounts.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table owns its own queries (`favorites`, `diary`, `accounts`)
//! - **Constraint-backed idempotence**: favorites are unique per `(library, path)`
//! - **One context**: [`SqliteStore`] implements every relational backend trait
//!
//! # Example
//!
//! ```rust,no_run
//! use keepsake_core::{FavoriteRef, FavoritesStore, Library};
//! use keepsake_storage::SqliteStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::connect("sqlite://keepsake.db").await?;
//!
//! let now_favorite = store
//!     .toggle_favorite(Library::Songs, &FavoriteRef::named("mix/a.mp3", "a.mp3"))
//!     .await?;
//! assert!(now_favorite);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod accounts;
pub mod diary;
pub mod favorites;

pub use context::SqliteStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://keepsake.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}
