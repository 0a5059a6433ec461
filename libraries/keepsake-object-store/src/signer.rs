//! Signed object URLs
//!
//! A signed URL carries an HS256 token naming exactly one object and an
//! expiry. The server's object route verifies the token before streaming
//! bytes, so possession of the URL is the only credential needed.

use crate::error::{ObjectStoreError, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Route prefix the server mounts signed object downloads under
pub const OBJECT_ROUTE: [&str; 2] = ["api", "objects"];

#[derive(Debug, Serialize, Deserialize)]
struct ObjectClaims {
    bucket: String,
    path: String,
    exp: i64,
    iat: i64,
}

/// Issues and verifies capability URLs for single objects
#[derive(Clone)]
pub struct UrlSigner {
    secret: String,
    public_url: Url,
}

impl std::fmt::Debug for UrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlSigner")
            .field("public_url", &self.public_url.as_str())
            .finish_non_exhaustive()
    }
}

impl UrlSigner {
    /// Create a signer for URLs rooted at `public_url`
    pub fn new(secret: impl Into<String>, public_url: &str) -> Result<Self> {
        let public_url =
            Url::parse(public_url).map_err(|e| ObjectStoreError::InvalidUrl(e.to_string()))?;
        if public_url.cannot_be_a_base() {
            return Err(ObjectStoreError::InvalidUrl(format!(
                "{public_url} cannot be used as a base URL"
            )));
        }

        Ok(Self {
            secret: secret.into(),
            public_url,
        })
    }

    /// Create a token granting read access to `bucket/path` for `ttl`
    pub fn sign_token(&self, bucket: &str, path: &str, ttl: Duration) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = ObjectClaims {
            bucket: bucket.to_string(),
            path: path.to_string(),
            exp: now + ttl.as_secs() as i64,
            iat: now,
        };

        let key = EncodingKey::from_secret(self.secret.as_bytes());
        Ok(encode(&Header::default(), &claims, &key)?)
    }

    /// Build the full download URL for an object
    pub fn signed_url(&self, bucket: &str, path: &str, ttl: Duration) -> Result<String> {
        let token = self.sign_token(bucket, path, ttl)?;

        let mut url = self.public_url.clone();
        url.path_segments_mut()
            .map_err(|()| ObjectStoreError::InvalidUrl(self.public_url.to_string()))?
            .pop_if_empty()
            .extend(OBJECT_ROUTE)
            .push(bucket)
            .extend(path.split('/'));
        url.query_pairs_mut().append_pair("token", &token);

        Ok(url.into())
    }

    /// Check that `token` is unexpired and was issued for `bucket/path`
    pub fn verify(&self, bucket: &str, path: &str, token: &str) -> Result<()> {
        let key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::default();
        validation.leeway = 0;

        let claims = decode::<ObjectClaims>(token, &key, &validation)?.claims;
        if claims.bucket != bucket || claims.path != path {
            return Err(ObjectStoreError::TokenMismatch(format!("{bucket}/{path}")));
        }
        Ok(())
    }
}
