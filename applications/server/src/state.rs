/// Shared application state
use crate::config::{ServerConfig, StorageBackend};
use crate::error::{Result, ServerError};
use crate::services::{events, AuthService, PlayerService, PortalEvent};
use keepsake_core::{AccountStore, DiaryStore, FavoritesStore, ObjectStore};
use keepsake_media::MediaService;
use keepsake_object_store::{LocalObjectStore, RemoteObjectStore, UrlSigner};
use keepsake_storage::SqliteStore;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub media: Arc<MediaService>,
    pub diary: Arc<dyn DiaryStore>,
    pub accounts: Arc<dyn AccountStore>,
    pub auth_service: Arc<AuthService>,
    pub player: Arc<PlayerService>,
    pub events: broadcast::Sender<PortalEvent>,
    /// Set when objects live on this machine and are served by `/api/objects`
    pub local_objects: Option<Arc<LocalObjectStore>>,
    /// Site-wide Basic credentials, when the gate is enabled
    pub basic_credentials: Option<(String, String)>,
    /// Visitors without a session may create accounts
    pub allow_signup: bool,
}

/// Backends the state is assembled from
pub struct Backends {
    pub objects: Arc<dyn ObjectStore>,
    pub local_objects: Option<Arc<LocalObjectStore>>,
    pub favorites: Arc<dyn FavoritesStore>,
    pub diary: Arc<dyn DiaryStore>,
    pub accounts: Arc<dyn AccountStore>,
}

impl Backends {
    /// Connect the database and object store named by the configuration
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let db = Arc::new(SqliteStore::connect(&config.storage.database_url).await?);
        tracing::info!("Database connected");

        let (objects, local_objects) = match config.storage.backend {
            StorageBackend::Local => {
                let signer =
                    UrlSigner::new(config.auth.session_secret.clone(), &config.server.public_url)?;
                let store = LocalObjectStore::new(config.storage.objects_path.clone(), signer);
                store.initialize().await?;
                tracing::info!(path = ?config.storage.objects_path, "Local object store initialized");

                let store = Arc::new(store);
                (store.clone() as Arc<dyn ObjectStore>, Some(store))
            }
            StorageBackend::Remote => {
                let (Some(url), Some(key)) = (
                    config.storage.remote_url.as_deref(),
                    config.storage.remote_service_key.clone(),
                ) else {
                    return Err(ServerError::Config(
                        "remote storage requires storage.remote_url and storage.remote_service_key"
                            .to_string(),
                    ));
                };
                let store = RemoteObjectStore::new(url, key)?;
                tracing::info!(url = %url, "Remote object store configured");
                (Arc::new(store) as Arc<dyn ObjectStore>, None)
            }
        };

        Ok(Self {
            objects,
            local_objects,
            favorites: db.clone(),
            diary: db.clone(),
            accounts: db,
        })
    }
}

impl AppState {
    pub fn new(config: &ServerConfig, backends: Backends) -> Self {
        let events = events::channel();
        let media = MediaService::new(backends.objects, backends.favorites, config.media_config());
        let auth_service = AuthService::new(
            config.auth.session_secret.clone(),
            config.auth.session_ttl_hours,
            config.auth.app_password_hash.clone(),
        );
        let player = PlayerService::new(config.session_labels(), events.clone());

        Self {
            media: Arc::new(media),
            diary: backends.diary,
            accounts: backends.accounts,
            auth_service: Arc::new(auth_service),
            player: Arc::new(player),
            events,
            local_objects: backends.local_objects,
            basic_credentials: config.basic_credentials(),
            allow_signup: config.auth.allow_signup,
        }
    }
}
