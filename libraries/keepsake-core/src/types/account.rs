use super::ids::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A portal account created through signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account ID
    pub id: AccountId,

    /// Login email (unique)
    pub email: String,

    /// Display name
    pub username: String,

    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Data needed to create an account; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login email
    pub email: String,

    /// Display name
    pub username: String,

    /// bcrypt hash of the password
    pub password_hash: String,
}
