//! Backend traits for Keepsake
//!
//! Every external capability the portal relies on sits behind one of these
//! traits. Implementations are constructed explicitly and passed in.

use crate::error::Result;
use crate::types::{
    Account, CreateDiaryEntry, DiaryEntry, DiaryEntryId, DiaryQuery, FavoriteRef, Library,
    ListOptions, NewAccount, ObjectEntry, UpdateDiaryEntry,
};
use async_trait::async_trait;
use std::time::Duration;

/// Object storage with signed URL issuance
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List entries directly under `prefix` (empty prefix = bucket root)
    ///
    /// Folders are returned as entries without a `.` in their name.
    async fn list(
        &self,
        library: Library,
        prefix: &str,
        options: &ListOptions,
    ) -> Result<Vec<ObjectEntry>>;

    /// Issue a time-limited read URL for one object
    async fn create_signed_url(&self, library: Library, path: &str, ttl: Duration)
        -> Result<String>;

    /// Store an object; with `upsert = false` an existing object is an error
    async fn upload(&self, library: Library, path: &str, data: Vec<u8>, upsert: bool)
        -> Result<()>;

    /// Remove objects; missing paths are ignored
    async fn remove(&self, library: Library, paths: &[String]) -> Result<()>;

    /// Read an object's bytes
    async fn read(&self, library: Library, path: &str) -> Result<Vec<u8>>;
}

/// The favorites relation
///
/// Rows are unique per `(library, path)`; adding is an upsert and removing
/// is delete-if-present, so every operation is idempotent.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// All favorites in a library, oldest first
    async fn list_favorites(&self, library: Library) -> Result<Vec<FavoriteRef>>;

    /// Insert or update a favorite
    async fn add_favorite(&self, library: Library, favorite: &FavoriteRef) -> Result<()>;

    /// Delete a favorite, returning whether a row existed
    async fn remove_favorite(&self, library: Library, path: &str) -> Result<bool>;

    /// Flip membership in one storage operation, returning the new membership
    async fn toggle_favorite(&self, library: Library, favorite: &FavoriteRef) -> Result<bool>;

    /// Whether a path is favorited
    async fn is_favorite(&self, library: Library, path: &str) -> Result<bool>;
}

/// Diary persistence
#[async_trait]
pub trait DiaryStore: Send + Sync {
    /// Create an entry
    async fn create_entry(&self, entry: CreateDiaryEntry) -> Result<DiaryEntry>;

    /// All entries, newest first
    async fn list_entries(&self) -> Result<Vec<DiaryEntry>>;

    /// One entry by ID
    async fn get_entry(&self, id: &DiaryEntryId) -> Result<Option<DiaryEntry>>;

    /// Apply a partial update and bump `updated_at`
    async fn update_entry(&self, id: &DiaryEntryId, update: UpdateDiaryEntry)
        -> Result<DiaryEntry>;

    /// Delete an entry, returning whether it existed
    async fn delete_entry(&self, id: &DiaryEntryId) -> Result<bool>;

    /// Entries matching a query, newest first
    async fn search_entries(&self, query: &DiaryQuery) -> Result<Vec<DiaryEntry>>;

    /// Every distinct tag, sorted
    async fn list_tags(&self) -> Result<Vec<String>>;
}

/// Account persistence for signup/login
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create an account; a taken email is `KeepsakeError::Duplicate`
    async fn create_account(&self, account: NewAccount) -> Result<Account>;

    /// Look up an account and its password hash by email
    async fn find_account_by_email(&self, email: &str) -> Result<Option<(Account, String)>>;

    /// All accounts, by email
    async fn list_accounts(&self) -> Result<Vec<Account>>;
}
