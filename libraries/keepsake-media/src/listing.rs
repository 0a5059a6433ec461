//! Folder-scoped media listings with signed URLs
//!
//! Listing and signing never fail outright: a folder that cannot be listed
//! contributes no items and an object that cannot be signed is dropped.
//! Mutations (upload, delete, folder creation) do report errors.

use crate::directory::{self, RootListing};
use crate::favorites::FavoritesAdapter;
use futures::future::join_all;
use keepsake_core::types::{file_name, is_folder_name, is_hidden_entry, join_path};
use keepsake_core::{
    FavoritesStore, FolderSelector, KeepsakeError, Library, ListOptions, MediaItem, MediaKind,
    ObjectStore, Result, SortOrder,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Zero-byte object that keeps an otherwise empty folder alive
pub const FOLDER_PLACEHOLDER: &str = ".emptyFolderPlaceholder";

#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Lifetime of every signed URL
    pub signed_url_ttl: Duration,

    /// Maximum entries per folder listing
    pub list_limit: usize,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            signed_url_ttl: Duration::from_secs(24 * 60 * 60),
            list_limit: 100,
        }
    }
}

#[derive(Clone)]
pub struct MediaService {
    objects: Arc<dyn ObjectStore>,
    favorites: FavoritesAdapter,
    config: MediaConfig,
}

impl MediaService {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        favorites: Arc<dyn FavoritesStore>,
        config: MediaConfig,
    ) -> Self {
        Self {
            objects,
            favorites: FavoritesAdapter::new(favorites),
            config,
        }
    }

    pub fn objects(&self) -> &Arc<dyn ObjectStore> {
        &self.objects
    }

    pub fn favorites(&self) -> &FavoritesAdapter {
        &self.favorites
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }

    fn list_options(&self) -> ListOptions {
        ListOptions {
            limit: self.config.list_limit,
            sort: SortOrder::Asc,
        }
    }

    /// Folder tabs: `"All"` then real folders, empty on failure
    pub async fn folders(&self, library: Library) -> Vec<String> {
        directory::list_folders(self.objects.as_ref(), library, self.config.list_limit).await
    }

    /// Resolve a folder selector to signed media items
    pub async fn list_media(&self, library: Library, folder: &FolderSelector) -> Vec<MediaItem> {
        match folder {
            FolderSelector::Favorites => self.list_favorites(library).await,
            FolderSelector::All => self.list_all(library).await,
            FolderSelector::Root => self.list_root_files(library).await,
            FolderSelector::Named(name) => match self.list_folder(library, name).await {
                Ok(items) => items,
                Err(e) => {
                    warn!(library = %library, folder = %name, error = %e, "Failed to list folder");
                    Vec::new()
                }
            },
        }
    }

    /// Every real folder in resolver order, then root-level files
    async fn list_all(&self, library: Library) -> Vec<MediaItem> {
        let root = match self.root_listing(library).await {
            Some(root) => root,
            None => return Vec::new(),
        };

        let mut items = Vec::new();
        for folder in &root.folders {
            match self.list_folder(library, folder).await {
                Ok(folder_items) => items.extend(folder_items),
                Err(e) => {
                    warn!(library = %library, folder = %folder, error = %e, "Skipping folder");
                }
            }
        }

        let root_paths = root.files;
        items.extend(self.sign_paths(library, root_paths).await);
        items
    }

    async fn list_root_files(&self, library: Library) -> Vec<MediaItem> {
        match self.root_listing(library).await {
            Some(root) => self.sign_paths(library, root.files).await,
            None => Vec::new(),
        }
    }

    async fn root_listing(&self, library: Library) -> Option<RootListing> {
        match directory::list_root(self.objects.as_ref(), library, self.config.list_limit).await {
            Ok(root) => Some(root),
            Err(e) => {
                warn!(library = %library, error = %e, "Failed to list library root");
                None
            }
        }
    }

    async fn list_folder(&self, library: Library, folder: &str) -> Result<Vec<MediaItem>> {
        let entries = self
            .objects
            .list(library, folder, &self.list_options())
            .await?;

        let paths = entries
            .into_iter()
            .filter(|e| {
                !e.name.is_empty() && !is_folder_name(&e.name) && !is_hidden_entry(&e.name)
            })
            .map(|e| join_path(folder, &e.name))
            .collect();

        Ok(self.sign_paths(library, paths).await)
    }

    async fn list_favorites(&self, library: Library) -> Vec<MediaItem> {
        match self.favorites.refs(library).await {
            Ok(refs) => self.sign_paths(library, refs.into_iter().map(|f| f.path).collect()).await,
            Err(e) => {
                warn!(library = %library, error = %e, "Failed to load favorites");
                Vec::new()
            }
        }
    }

    /// Sign paths concurrently; output keeps input order, failures dropped
    async fn sign_paths(&self, library: Library, paths: Vec<String>) -> Vec<MediaItem> {
        let ttl = self.config.signed_url_ttl;
        let signed = join_all(paths.into_iter().map(|path| async move {
            match self.objects.create_signed_url(library, &path, ttl).await {
                Ok(url) => Some(MediaItem {
                    name: file_name(&path).to_string(),
                    kind: MediaKind::classify(library, &path),
                    url,
                    path,
                }),
                Err(e) => {
                    debug!(library = %library, path = %path, error = %e, "Dropping unsignable item");
                    None
                }
            }
        }))
        .await;

        signed.into_iter().flatten().collect()
    }

    /// Upload a file into a folder (root for the synthetic folders)
    ///
    /// Existing objects at the destination are replaced. Returns the object
    /// path.
    pub async fn upload(
        &self,
        library: Library,
        folder: &FolderSelector,
        name: &str,
        data: Vec<u8>,
    ) -> Result<String> {
        validate_file_name(name)?;
        let path = match folder.upload_folder() {
            Some(folder) => {
                validate_folder_name(folder)?;
                join_path(folder, name)
            }
            None => name.to_string(),
        };

        self.objects.upload(library, &path, data, true).await?;
        info!(library = %library, path = %path, "Uploaded object");
        Ok(path)
    }

    /// Delete an object and any favorite pointing at it
    pub async fn delete(&self, library: Library, path: &str) -> Result<()> {
        self.objects.remove(library, &[path.to_string()]).await?;
        info!(library = %library, path = %path, "Deleted object");

        if let Err(e) = self.favorites.remove(library, path).await {
            warn!(library = %library, path = %path, error = %e, "Failed to drop favorite of deleted object");
        }
        Ok(())
    }

    /// Create an empty folder
    pub async fn create_folder(&self, library: Library, name: &str) -> Result<()> {
        let name = name.trim();
        validate_folder_name(name)?;

        self.objects
            .upload(library, &join_path(name, FOLDER_PLACEHOLDER), Vec::new(), true)
            .await?;
        info!(library = %library, folder = %name, "Created folder");
        Ok(())
    }
}

/// Folders are a single top-level segment without a dot
fn validate_folder_name(name: &str) -> Result<()> {
    if !is_folder_name(name) || name.contains('/') || name.contains('\\') {
        return Err(KeepsakeError::invalid_input(format!(
            "invalid folder name: {name:?}"
        )));
    }
    Ok(())
}

fn validate_file_name(name: &str) -> Result<()> {
    if name.trim().is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || is_hidden_entry(name)
    {
        return Err(KeepsakeError::invalid_input(format!(
            "invalid file name: {name:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_validated() {
        for ok in ["a.mp3", "beach day.jpg", "track"] {
            assert!(validate_file_name(ok).is_ok(), "{ok}");
        }
        for bad in ["", "  ", "a/b.mp3", "..", "x..y", ".hidden", "a\\b"] {
            assert!(validate_file_name(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn folder_names_are_single_segments() {
        assert!(validate_folder_name("2024").is_ok());
        for bad in ["", "2024/trip", "a\\b", "has.dot", "../up"] {
            assert!(validate_folder_name(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn default_ttl_is_one_day() {
        assert_eq!(MediaConfig::default().signed_url_ttl, Duration::from_secs(86_400));
        assert_eq!(MediaConfig::default().list_limit, 100);
    }
}
