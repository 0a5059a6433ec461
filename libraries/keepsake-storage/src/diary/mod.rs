//! Diary entries
//!
//! `content`, `media` and `tags` are stored as JSON text. Keyword search
//! looks at the title and at the string leaves of the content document
//! (not its keys), plus exact tag membership.

use chrono::{DateTime, Utc};
use keepsake_core::{
    error::Result, CreateDiaryEntry, DiaryEntry, DiaryEntryId, DiaryMedia, DiaryQuery,
    KeepsakeError, UpdateDiaryEntry,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

const SELECT_COLUMNS: &str =
    "SELECT id, title, content, media, tags, created_at, updated_at FROM diary_entries";

fn timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| KeepsakeError::storage("Invalid timestamp"))
}

fn entry_from_row(row: &SqliteRow) -> Result<DiaryEntry> {
    let content: String = row.get("content");
    let media: String = row.get("media");
    let tags: String = row.get("tags");

    Ok(DiaryEntry {
        id: row.get("id"),
        title: row.get("title"),
        content: serde_json::from_str(&content)?,
        media: serde_json::from_str::<Vec<DiaryMedia>>(&media)?,
        tags: serde_json::from_str(&tags)?,
        created_at: timestamp(row.get("created_at"))?,
        updated_at: timestamp(row.get("updated_at"))?,
    })
}

/// Trim, drop empty and duplicate tags while keeping first-seen order
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

/// Escape `%`, `_` and `\` for a LIKE pattern using `\` as escape
fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Create an entry
pub async fn create(pool: &SqlitePool, entry: CreateDiaryEntry) -> Result<DiaryEntry> {
    if entry.title.trim().is_empty() {
        return Err(KeepsakeError::invalid_input("diary title cannot be empty"));
    }

    let id = DiaryEntryId::generate();
    let now = Utc::now().timestamp_millis();
    let tags = normalize_tags(entry.tags);

    sqlx::query(
        r#"
        INSERT INTO diary_entries (id, title, content, media, tags, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(entry.title.trim())
    .bind(serde_json::to_string(&entry.content)?)
    .bind(serde_json::to_string(&entry.media)?)
    .bind(serde_json::to_string(&tags)?)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_by_id(pool, &id)
        .await?
        .ok_or_else(|| KeepsakeError::not_found("DiaryEntry", id.as_str()))
}

/// All entries, newest first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<DiaryEntry>> {
    let rows = sqlx::query(&format!(
        "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC"
    ))
    .fetch_all(pool)
    .await?;

    rows.iter().map(entry_from_row).collect()
}

/// One entry by ID
pub async fn get_by_id(pool: &SqlitePool, id: &DiaryEntryId) -> Result<Option<DiaryEntry>> {
    let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(entry_from_row).transpose()
}

/// Apply a partial update and bump `updated_at`
pub async fn update(
    pool: &SqlitePool,
    id: &DiaryEntryId,
    update: UpdateDiaryEntry,
) -> Result<DiaryEntry> {
    let mut tx = pool.begin().await?;

    let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| KeepsakeError::not_found("DiaryEntry", id.as_str()))?;
    let mut entry = entry_from_row(&row)?;

    if let Some(title) = update.title {
        if title.trim().is_empty() {
            return Err(KeepsakeError::invalid_input("diary title cannot be empty"));
        }
        entry.title = title.trim().to_string();
    }
    if let Some(content) = update.content {
        entry.content = content;
    }
    if let Some(media) = update.media {
        entry.media = media;
    }
    if let Some(tags) = update.tags {
        entry.tags = normalize_tags(tags);
    }

    // Never move backwards if the clock did
    let updated_at = Utc::now()
        .timestamp_millis()
        .max(entry.updated_at.timestamp_millis());

    sqlx::query(
        r#"
        UPDATE diary_entries
        SET title = ?, content = ?, media = ?, tags = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&entry.title)
    .bind(serde_json::to_string(&entry.content)?)
    .bind(serde_json::to_string(&entry.media)?)
    .bind(serde_json::to_string(&entry.tags)?)
    .bind(updated_at)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    entry.updated_at = timestamp(updated_at)?;
    Ok(entry)
}

/// Delete an entry, returning whether it existed
pub async fn delete(pool: &SqlitePool, id: &DiaryEntryId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM diary_entries WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Entries matching a query, newest first
///
/// An empty query (no keyword, no tag) returns every entry.
pub async fn search(pool: &SqlitePool, query: &DiaryQuery) -> Result<Vec<DiaryEntry>> {
    let keyword = query
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty());
    let tag = query.tag.as_deref().map(str::trim).filter(|t| !t.is_empty());

    let rows = sqlx::query(&format!(
        r#"
        {SELECT_COLUMNS}
        WHERE (
            ?1 IS NULL
            OR title LIKE ?2 ESCAPE '\'
            OR EXISTS (
                SELECT 1 FROM json_tree(diary_entries.content)
                WHERE json_tree.type = 'text' AND json_tree.value LIKE ?2 ESCAPE '\'
            )
            OR EXISTS (
                SELECT 1 FROM json_each(diary_entries.tags) WHERE json_each.value = ?1
            )
        )
        AND (
            ?3 IS NULL
            OR EXISTS (
                SELECT 1 FROM json_each(diary_entries.tags) WHERE json_each.value = ?3
            )
        )
        ORDER BY created_at DESC, rowid DESC
        "#
    ))
    .bind(keyword)
    .bind(keyword.map(like_pattern))
    .bind(tag)
    .fetch_all(pool)
    .await?;

    rows.iter().map(entry_from_row).collect()
}

/// Every distinct tag, sorted
pub async fn get_tags(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT json_each.value AS tag
        FROM diary_entries, json_each(diary_entries.tags)
        ORDER BY tag
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| row.get("tag")).collect())
}
