/// Authentication service - session tokens and password handling
use crate::error::{Result, ServerError};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "keepsake_session";

/// Subject recorded for app-password sessions
const APP_PASSWORD_SUBJECT: &str = "app";

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    session_ttl: Duration,
    app_password_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Account ID, or "app" for the shared password
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub method: LoginMethod,
}

/// Which credential opened a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginMethod {
    AppPassword,
    Account,
}

impl AuthService {
    pub fn new(secret: String, session_ttl_hours: u64, app_password_hash: Option<String>) -> Self {
        Self {
            secret,
            session_ttl: Duration::hours(session_ttl_hours as i64),
            app_password_hash: app_password_hash.filter(|h| !h.is_empty()),
        }
    }

    /// Session lifetime in seconds, for the cookie `Max-Age`
    pub fn session_ttl_secs(&self) -> i64 {
        self.session_ttl.num_seconds()
    }

    /// Hash a password using bcrypt
    pub fn hash_password(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(ServerError::from)
    }

    /// Verify a password against a hash
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(ServerError::from)
    }

    /// Check the shared app password; always false when none is configured
    pub fn verify_app_password(&self, password: &str) -> Result<bool> {
        match &self.app_password_hash {
            Some(hash) => self.verify_password(password, hash),
            None => Ok(false),
        }
    }

    /// Session token for the shared app password
    pub fn create_app_session(&self) -> Result<String> {
        self.create_session(APP_PASSWORD_SUBJECT, LoginMethod::AppPassword)
    }

    /// Session token for a signed-in account
    pub fn create_account_session(&self, account_id: &str) -> Result<String> {
        self.create_session(account_id, LoginMethod::Account)
    }

    /// Verify and decode a session token
    pub fn verify_session(&self, token: &str) -> Result<Claims> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    fn create_session(&self, subject: &str, method: LoginMethod) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.session_ttl;

        let claims = Claims {
            sub: subject.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            method,
        };

        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), &claims, &encoding_key).map_err(ServerError::from)
    }
}
