//! Signup accounts

use chrono::{DateTime, Utc};
use keepsake_core::{error::Result, Account, AccountId, KeepsakeError, NewAccount};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn account_from_row(row: &SqliteRow) -> Result<Account> {
    Ok(Account {
        id: row.get("id"),
        email: row.get("email"),
        username: row.get("username"),
        created_at: DateTime::<Utc>::from_timestamp_millis(row.get("created_at"))
            .ok_or_else(|| KeepsakeError::storage("Invalid timestamp"))?,
    })
}

/// Create an account; the email must be unused (case-insensitive)
pub async fn create(pool: &SqlitePool, account: NewAccount) -> Result<Account> {
    let id = AccountId::generate();
    let created_at = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO accounts (id, email, username, password_hash, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(account.email.trim())
    .bind(&account.username)
    .bind(&account.password_hash)
    .bind(created_at.timestamp_millis())
    .execute(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            KeepsakeError::Duplicate(format!("account {}", account.email.trim()))
        }
        other => other.into(),
    })?;

    Ok(Account {
        id,
        email: account.email.trim().to_string(),
        username: account.username,
        // Stored at millisecond precision
        created_at: DateTime::<Utc>::from_timestamp_millis(created_at.timestamp_millis())
            .unwrap_or(created_at),
    })
}

/// Account and password hash by email
pub async fn get_by_email(pool: &SqlitePool, email: &str) -> Result<Option<(Account, String)>> {
    let row = sqlx::query(
        "SELECT id, email, username, password_hash, created_at FROM accounts WHERE email = ?",
    )
    .bind(email.trim())
    .fetch_optional(pool)
    .await?;

    row.map(|row| Ok((account_from_row(&row)?, row.get("password_hash"))))
        .transpose()
}

/// All accounts, by email
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Account>> {
    let rows = sqlx::query("SELECT id, email, username, created_at FROM accounts ORDER BY email")
        .fetch_all(pool)
        .await?;

    rows.iter().map(account_from_row).collect()
}
