//! Favorites set per library

use keepsake_core::{FavoriteRef, FavoritesStore, Library, Result};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Thin view of the favorites relation as a set of object paths
#[derive(Clone)]
pub struct FavoritesAdapter {
    store: Arc<dyn FavoritesStore>,
}

impl FavoritesAdapter {
    pub fn new(store: Arc<dyn FavoritesStore>) -> Self {
        Self { store }
    }

    /// Favorited paths in a library
    pub async fn list(&self, library: Library) -> Result<BTreeSet<String>> {
        Ok(self
            .store
            .list_favorites(library)
            .await?
            .into_iter()
            .map(|f| f.path)
            .collect())
    }

    /// Favorite refs in insertion order
    pub async fn refs(&self, library: Library) -> Result<Vec<FavoriteRef>> {
        self.store.list_favorites(library).await
    }

    /// Flip membership of `path`, returning whether it is now a favorite
    pub async fn toggle(&self, library: Library, path: &str, name: Option<&str>) -> Result<bool> {
        let favorite = FavoriteRef {
            path: path.to_string(),
            name: name.map(str::to_string),
        };
        self.store.toggle_favorite(library, &favorite).await
    }

    pub async fn add(&self, library: Library, path: &str, name: Option<&str>) -> Result<()> {
        let favorite = FavoriteRef {
            path: path.to_string(),
            name: name.map(str::to_string),
        };
        self.store.add_favorite(library, &favorite).await
    }

    pub async fn remove(&self, library: Library, path: &str) -> Result<bool> {
        self.store.remove_favorite(library, path).await
    }
}
