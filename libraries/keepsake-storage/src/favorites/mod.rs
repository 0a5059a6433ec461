//! Favorites relation
//!
//! One row per `(library, path)`, enforced by a UNIQUE constraint. Every
//! write is idempotent: adding upserts, removing deletes if present, and
//! toggling runs delete-or-insert inside one transaction.

use keepsake_core::{error::Result, FavoriteRef, Library};
use sqlx::{Row, SqlitePool};

/// All favorites in a library, oldest first
pub async fn get_all(pool: &SqlitePool, library: Library) -> Result<Vec<FavoriteRef>> {
    let rows = sqlx::query("SELECT path, name FROM favorites WHERE library = ? ORDER BY id")
        .bind(library.bucket())
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| FavoriteRef {
            path: row.get("path"),
            name: row.get("name"),
        })
        .collect())
}

/// Whether a path is favorited
pub async fn exists(pool: &SqlitePool, library: Library, path: &str) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM favorites WHERE library = ? AND path = ?")
        .bind(library.bucket())
        .bind(path)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Insert a favorite, refreshing its display name if it already exists
pub async fn upsert(pool: &SqlitePool, library: Library, favorite: &FavoriteRef) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO favorites (library, path, name, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (library, path) DO UPDATE SET
            name = COALESCE(excluded.name, favorites.name)
        "#,
    )
    .bind(library.bucket())
    .bind(&favorite.path)
    .bind(&favorite.name)
    .bind(chrono::Utc::now().timestamp_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a favorite, returning whether a row existed
pub async fn delete(pool: &SqlitePool, library: Library, path: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM favorites WHERE library = ? AND path = ?")
        .bind(library.bucket())
        .bind(path)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Flip membership, returning whether the path is a favorite afterwards
///
/// The delete runs first and takes the write lock, so two concurrent
/// toggles serialize instead of both observing "absent" and inserting.
pub async fn toggle(pool: &SqlitePool, library: Library, favorite: &FavoriteRef) -> Result<bool> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM favorites WHERE library = ? AND path = ?")
        .bind(library.bucket())
        .bind(&favorite.path)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let now_favorite = if deleted > 0 {
        false
    } else {
        sqlx::query(
            r#"
            INSERT INTO favorites (library, path, name, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (library, path) DO NOTHING
            "#,
        )
        .bind(library.bucket())
        .bind(&favorite.path)
        .bind(&favorite.name)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&mut *tx)
        .await?;
        true
    };

    tx.commit().await?;
    Ok(now_favorite)
}
