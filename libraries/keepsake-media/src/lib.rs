//! Keepsake Media
//!
//! The pipeline shared by the gallery and the song library:
//!
//! - [`directory`]: which folders a library has
//! - [`listing`]: folder-scoped listings resolved to signed URLs, plus
//!   upload, delete and folder creation
//! - [`favorites`]: the per-library favorites set
//!
//! All backends are injected as trait objects, so the same service runs
//! against the filesystem store, the hosted store, or an in-memory fake.
//!
//! # Example
//!
//! ```rust,ignore
//! use keepsake_core::{FolderSelector, Library};
//! use keepsake_media::{MediaConfig, MediaService};
//!
//! let media = MediaService::new(objects, favorites, MediaConfig::default());
//! let folders = media.folders(Library::Songs).await;
//! let items = media.list_media(Library::Songs, &FolderSelector::All).await;
//! ```

pub mod diary_media;
pub mod directory;
pub mod favorites;
pub mod listing;

pub use favorites::FavoritesAdapter;
pub use listing::{MediaConfig, MediaService, FOLDER_PLACEHOLDER};
