//! REST client for a hosted object storage service.
//!
//! Speaks the `/storage/v1/object` API: bucket listing, signed URL issuance,
//! upload with `x-upsert`, bulk delete and authenticated download. The
//! service key is sent both as `apikey` and as a bearer token.

use crate::error::{ObjectStoreError, Result};
use crate::path::{normalize_key, normalize_prefix};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use keepsake_core::{Library, ListOptions, ObjectEntry, ObjectStore, SortOrder};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for a remote object store.
///
/// # Example
///
/// ```ignore
/// use keepsake_object_store::RemoteObjectStore;
///
/// let store = RemoteObjectStore::new("https://project.example.co", "service-key")?;
/// let folders = store.list_entries(Library::Photos, "", &ListOptions::default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RemoteObjectStore {
    http: Client,
    base_url: Url,
    service_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: usize,
    offset: usize,
    sort_by: SortBy,
}

#[derive(Serialize)]
struct SortBy {
    column: &'static str,
    order: &'static str,
}

#[derive(Deserialize)]
struct RemoteEntry {
    name: String,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    metadata: Option<RemoteMetadata>,
}

#[derive(Deserialize)]
struct RemoteMetadata {
    #[serde(default)]
    size: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignRequest {
    expires_in: u64,
}

#[derive(Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

impl RemoteObjectStore {
    /// Create a client for the store at `base_url`.
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Result<Self> {
        if base_url.is_empty() {
            return Err(ObjectStoreError::InvalidUrl("URL cannot be empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ObjectStoreError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        let base_url =
            Url::parse(base_url).map_err(|e| ObjectStoreError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Keepsake/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            service_key: service_key.into(),
        })
    }

    /// `{base}/storage/v1/object/{segments...}/{key...}`
    fn endpoint(&self, segments: &[&str], key: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ObjectStoreError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty()
                .extend(["storage", "v1", "object"])
                .extend(segments);
            if let Some(key) = key {
                path.extend(key.split('/'));
            }
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), what, message = %message, "Remote store request failed");
        Err(match status {
            StatusCode::NOT_FOUND => ObjectStoreError::NotFound(what.to_string()),
            StatusCode::CONFLICT => ObjectStoreError::AlreadyExists(what.to_string()),
            _ => ObjectStoreError::Remote {
                status: status.as_u16(),
                message,
            },
        })
    }

    pub async fn list_entries(
        &self,
        library: Library,
        prefix: &str,
        options: &ListOptions,
    ) -> Result<Vec<ObjectEntry>> {
        let prefix = normalize_prefix(prefix)?;
        let url = self.endpoint(&["list", library.bucket()], None)?;
        let body = ListRequest {
            prefix: &prefix,
            limit: options.limit,
            offset: 0,
            sort_by: SortBy {
                column: "name",
                order: match options.sort {
                    SortOrder::Asc => "asc",
                    SortOrder::Desc => "desc",
                },
            },
        };

        let response = self.send(self.http.post(url).json(&body), &prefix).await?;
        let entries: Vec<RemoteEntry> = response
            .json()
            .await
            .map_err(|e| ObjectStoreError::Parse(format!("Failed to parse listing: {e}")))?;

        Ok(entries
            .into_iter()
            .map(|entry| ObjectEntry {
                name: entry.name,
                size: entry.metadata.and_then(|m| m.size),
                updated_at: entry.updated_at,
            })
            .collect())
    }

    pub async fn signed_url(&self, library: Library, path: &str, ttl: Duration) -> Result<String> {
        let key = normalize_key(path)?;
        let url = self.endpoint(&["sign", library.bucket()], Some(&key))?;
        let body = SignRequest {
            expires_in: ttl.as_secs(),
        };

        let response = self.send(self.http.post(url).json(&body), &key).await?;
        let signed: SignResponse = response
            .json()
            .await
            .map_err(|e| ObjectStoreError::Parse(format!("Failed to parse signed URL: {e}")))?;

        // The service answers with a path relative to /storage/v1
        Ok(format!(
            "{}/storage/v1{}",
            self.base_url.as_str().trim_end_matches('/'),
            signed.signed_url
        ))
    }

    pub async fn put(&self, library: Library, path: &str, data: Vec<u8>, upsert: bool) -> Result<()> {
        let key = normalize_key(path)?;
        let url = self.endpoint(&[library.bucket()], Some(&key))?;
        let content_type = mime_guess::from_path(&key).first_or_octet_stream();

        let request = self
            .http
            .post(url)
            .header("x-upsert", if upsert { "true" } else { "false" })
            .header(reqwest::header::CONTENT_TYPE, content_type.as_ref())
            .body(data);
        self.send(request, &key).await?;
        Ok(())
    }

    pub async fn delete(&self, library: Library, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let keys = paths
            .iter()
            .map(|p| normalize_key(p))
            .collect::<Result<Vec<_>>>()?;
        let url = self.endpoint(&[library.bucket()], None)?;

        self.send(
            self.http.delete(url).json(&RemoveRequest { prefixes: &keys }),
            library.bucket(),
        )
        .await?;
        Ok(())
    }

    pub async fn get(&self, library: Library, path: &str) -> Result<Vec<u8>> {
        let key = normalize_key(path)?;
        let url = self.endpoint(&["authenticated", library.bucket()], Some(&key))?;

        let response = self.send(self.http.get(url), &key).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ObjectStore for RemoteObjectStore {
    async fn list(
        &self,
        library: Library,
        prefix: &str,
        options: &ListOptions,
    ) -> keepsake_core::Result<Vec<ObjectEntry>> {
        Ok(self.list_entries(library, prefix, options).await?)
    }

    async fn create_signed_url(
        &self,
        library: Library,
        path: &str,
        ttl: Duration,
    ) -> keepsake_core::Result<String> {
        Ok(self.signed_url(library, path, ttl).await?)
    }

    async fn upload(
        &self,
        library: Library,
        path: &str,
        data: Vec<u8>,
        upsert: bool,
    ) -> keepsake_core::Result<()> {
        Ok(self.put(library, path, data, upsert).await?)
    }

    async fn remove(&self, library: Library, paths: &[String]) -> keepsake_core::Result<()> {
        Ok(self.delete(library, paths).await?)
    }

    async fn read(&self, library: Library, path: &str) -> keepsake_core::Result<Vec<u8>> {
        Ok(self.get(library, path).await?)
    }
}
