use crate::{accounts, diary, error::StorageError, favorites};
use async_trait::async_trait;
use keepsake_core::{
    error::Result, Account, AccountStore, CreateDiaryEntry, DiaryEntry, DiaryEntryId, DiaryQuery,
    DiaryStore, FavoriteRef, FavoritesStore, Library, NewAccount, UpdateDiaryEntry,
};
use sqlx::SqlitePool;

/// `SQLite`-backed implementation of the relational backend traits
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) and migrate a database
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl FavoritesStore for SqliteStore {
    async fn list_favorites(&self, library: Library) -> Result<Vec<FavoriteRef>> {
        favorites::get_all(&self.pool, library).await
    }

    async fn add_favorite(&self, library: Library, favorite: &FavoriteRef) -> Result<()> {
        favorites::upsert(&self.pool, library, favorite).await
    }

    async fn remove_favorite(&self, library: Library, path: &str) -> Result<bool> {
        favorites::delete(&self.pool, library, path).await
    }

    async fn toggle_favorite(&self, library: Library, favorite: &FavoriteRef) -> Result<bool> {
        favorites::toggle(&self.pool, library, favorite).await
    }

    async fn is_favorite(&self, library: Library, path: &str) -> Result<bool> {
        favorites::exists(&self.pool, library, path).await
    }
}

#[async_trait]
impl DiaryStore for SqliteStore {
    async fn create_entry(&self, entry: CreateDiaryEntry) -> Result<DiaryEntry> {
        diary::create(&self.pool, entry).await
    }

    async fn list_entries(&self) -> Result<Vec<DiaryEntry>> {
        diary::get_all(&self.pool).await
    }

    async fn get_entry(&self, id: &DiaryEntryId) -> Result<Option<DiaryEntry>> {
        diary::get_by_id(&self.pool, id).await
    }

    async fn update_entry(
        &self,
        id: &DiaryEntryId,
        update: UpdateDiaryEntry,
    ) -> Result<DiaryEntry> {
        diary::update(&self.pool, id, update).await
    }

    async fn delete_entry(&self, id: &DiaryEntryId) -> Result<bool> {
        diary::delete(&self.pool, id).await
    }

    async fn search_entries(&self, query: &DiaryQuery) -> Result<Vec<DiaryEntry>> {
        diary::search(&self.pool, query).await
    }

    async fn list_tags(&self) -> Result<Vec<String>> {
        diary::get_tags(&self.pool).await
    }
}

#[async_trait]
impl AccountStore for SqliteStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account> {
        accounts::create(&self.pool, account).await
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<(Account, String)>> {
        accounts::get_by_email(&self.pool, email).await
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        accounts::get_all(&self.pool).await
    }
}
