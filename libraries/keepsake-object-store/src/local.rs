//! Filesystem-backed object store
//!
//! Each bucket is a directory under the store root and object keys map to
//! relative paths inside it. Folders exist implicitly as directories.

use crate::error::{ObjectStoreError, Result};
use crate::path::{normalize_key, normalize_prefix};
use crate::signer::UrlSigner;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use keepsake_core::{Library, ListOptions, ObjectEntry, ObjectStore, SortOrder};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    signer: UrlSigner,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, signer: UrlSigner) -> Self {
        Self {
            root: root.into(),
            signer,
        }
    }

    /// Create one directory per bucket
    pub async fn initialize(&self) -> Result<()> {
        for library in Library::ALL {
            fs::create_dir_all(self.bucket_dir(library)).await?;
        }
        Ok(())
    }

    /// Signer used for this store's URLs
    pub fn signer(&self) -> &UrlSigner {
        &self.signer
    }

    fn bucket_dir(&self, library: Library) -> PathBuf {
        self.root.join(library.bucket())
    }

    fn object_path(&self, library: Library, key: &str) -> PathBuf {
        key.split('/')
            .fold(self.bucket_dir(library), |path, segment| path.join(segment))
    }

    pub async fn list_entries(
        &self,
        library: Library,
        prefix: &str,
        options: &ListOptions,
    ) -> Result<Vec<ObjectEntry>> {
        let prefix = normalize_prefix(prefix)?;
        let dir = if prefix.is_empty() {
            self.bucket_dir(library)
        } else {
            self.object_path(library, &prefix)
        };

        let mut read_dir = match fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            // Unknown prefixes list as empty
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                debug!(path = ?entry.path(), "Skipping non UTF-8 object name");
                continue;
            };
            let metadata = entry.metadata().await?;

            if metadata.is_dir() {
                entries.push(ObjectEntry::named(name));
            } else {
                entries.push(ObjectEntry {
                    name,
                    size: Some(metadata.len()),
                    updated_at: metadata.modified().ok().map(DateTime::<Utc>::from),
                });
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        if options.sort == SortOrder::Desc {
            entries.reverse();
        }
        entries.truncate(options.limit);

        Ok(entries)
    }

    pub async fn signed_url(&self, library: Library, path: &str, ttl: Duration) -> Result<String> {
        let key = normalize_key(path)?;
        let is_file = fs::metadata(self.object_path(library, &key))
            .await
            .is_ok_and(|meta| meta.is_file());
        if !is_file {
            return Err(ObjectStoreError::NotFound(key));
        }
        self.signer.signed_url(library.bucket(), &key, ttl)
    }

    pub async fn put(&self, library: Library, path: &str, data: &[u8], upsert: bool) -> Result<()> {
        let key = normalize_key(path)?;
        let target = self.object_path(library, &key);

        if !upsert && fs::try_exists(&target).await? {
            return Err(ObjectStoreError::AlreadyExists(key));
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&target, data).await?;
        debug!(bucket = library.bucket(), key, bytes = data.len(), "Stored object");
        Ok(())
    }

    pub async fn delete(&self, library: Library, paths: &[String]) -> Result<()> {
        let bucket_dir = self.bucket_dir(library);

        for path in paths {
            let key = normalize_key(path)?;
            let target = self.object_path(library, &key);

            match fs::remove_file(&target).await {
                Ok(()) => prune_empty_parents(&target, &bucket_dir).await,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub async fn get(&self, library: Library, path: &str) -> Result<Vec<u8>> {
        let key = normalize_key(path)?;
        match fs::read(self.object_path(library, &key)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ObjectStoreError::NotFound(key)),
            Err(e) => Err(e.into()),
        }
    }
}

/// Remove now-empty folders between a deleted object and its bucket
async fn prune_empty_parents(object: &Path, bucket_dir: &Path) {
    let mut current = object.parent();
    while let Some(dir) = current {
        if dir == bucket_dir || fs::remove_dir(dir).await.is_err() {
            break;
        }
        current = dir.parent();
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
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
        Ok(self.put(library, path, &data, upsert).await?)
    }

    async fn remove(&self, library: Library, paths: &[String]) -> keepsake_core::Result<()> {
        Ok(self.delete(library, paths).await?)
    }

    async fn read(&self, library: Library, path: &str) -> keepsake_core::Result<Vec<u8>> {
        Ok(self.get(library, path).await?)
    }
}
