//! Shared fixtures for media service tests

#![allow(dead_code)]

use async_trait::async_trait;
use keepsake_core::{
    KeepsakeError, Library, ListOptions, ObjectEntry, ObjectStore, Result, SortOrder,
};
use keepsake_media::{MediaConfig, MediaService};
use keepsake_storage::SqliteStore;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// In-memory object store with failure injection
#[derive(Default)]
pub struct FakeObjectStore {
    objects: Mutex<BTreeMap<(Library, String), Vec<u8>>>,
    failing_prefixes: Mutex<BTreeSet<String>>,
    failing_signs: Mutex<BTreeSet<String>>,
    sign_delays: Mutex<HashMap<String, Duration>>,
}

impl FakeObjectStore {
    pub fn with_objects(library: Library, paths: &[&str]) -> Self {
        let store = Self::default();
        for path in paths {
            store.insert(library, path);
        }
        store
    }

    pub fn insert(&self, library: Library, path: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert((library, path.to_string()), Vec::new());
    }

    pub fn contains(&self, library: Library, path: &str) -> bool {
        self.objects
            .lock()
            .unwrap()
            .contains_key(&(library, path.to_string()))
    }

    pub fn fail_listing(&self, prefix: &str) {
        self.failing_prefixes.lock().unwrap().insert(prefix.to_string());
    }

    pub fn fail_signing(&self, path: &str) {
        self.failing_signs.lock().unwrap().insert(path.to_string());
    }

    pub fn delay_signing(&self, path: &str, delay: Duration) {
        self.sign_delays
            .lock()
            .unwrap()
            .insert(path.to_string(), delay);
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn list(
        &self,
        library: Library,
        prefix: &str,
        options: &ListOptions,
    ) -> Result<Vec<ObjectEntry>> {
        if self.failing_prefixes.lock().unwrap().contains(prefix) {
            return Err(KeepsakeError::object_store(format!("cannot list {prefix}")));
        }

        let lead = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}/")
        };

        let mut names: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(l, _)| *l == library)
            .filter_map(|(_, path)| path.strip_prefix(&lead))
            .map(|rest| rest.split('/').next().unwrap_or(rest).to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        if options.sort == SortOrder::Desc {
            names.reverse();
        }
        names.truncate(options.limit);
        Ok(names.into_iter().map(ObjectEntry::named).collect())
    }

    async fn create_signed_url(&self, library: Library, path: &str, ttl: Duration) -> Result<String> {
        let delay = self.sign_delays.lock().unwrap().get(path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_signs.lock().unwrap().contains(path) || !self.contains(library, path) {
            return Err(KeepsakeError::not_found("Object", path));
        }
        Ok(format!(
            "https://signed.test/{}/{}?ttl={}",
            library.bucket(),
            path,
            ttl.as_secs()
        ))
    }

    async fn upload(&self, library: Library, path: &str, data: Vec<u8>, upsert: bool) -> Result<()> {
        let mut objects = self.objects.lock().unwrap();
        let key = (library, path.to_string());
        if !upsert && objects.contains_key(&key) {
            return Err(KeepsakeError::Duplicate(path.to_string()));
        }
        objects.insert(key, data);
        Ok(())
    }

    async fn remove(&self, library: Library, paths: &[String]) -> Result<()> {
        let mut objects = self.objects.lock().unwrap();
        for path in paths {
            objects.remove(&(library, path.clone()));
        }
        Ok(())
    }

    async fn read(&self, library: Library, path: &str) -> Result<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(library, path.to_string()))
            .cloned()
            .ok_or_else(|| KeepsakeError::not_found("Object", path))
    }
}

/// Media service over a fake object store and a real SQLite favorites table
pub struct TestMedia {
    pub service: MediaService,
    pub objects: Arc<FakeObjectStore>,
    pub db: SqliteStore,
    _temp_dir: TempDir,
}

impl TestMedia {
    pub async fn new(objects: FakeObjectStore) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let db = SqliteStore::connect(&db_url)
            .await
            .expect("Failed to open test database");

        let objects = Arc::new(objects);
        let service = MediaService::new(objects.clone(), Arc::new(db.clone()), MediaConfig::default());

        Self {
            service,
            objects,
            db,
            _temp_dir: temp_dir,
        }
    }
}

pub fn paths(items: &[keepsake_core::MediaItem]) -> Vec<&str> {
    items.iter().map(|i| i.path.as_str()).collect()
}
