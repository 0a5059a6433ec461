/// Server configuration
use crate::error::{Result, ServerError};
use keepsake_media::MediaConfig;
use keepsake_playback::{Artwork, SessionLabels};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_media")]
    pub media: MediaSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally reachable base URL, used in locally signed object URLs
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Objects on the local filesystem, served by this process
    Local,
    /// Hosted object storage over its REST API
    Remote,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    #[serde(default = "default_objects_path")]
    pub objects_path: PathBuf,

    #[serde(default)]
    pub remote_url: Option<String>,

    #[serde(default)]
    pub remote_service_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub session_secret: String,

    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: u64,

    /// bcrypt hash of the shared app password (see `hash-password`)
    #[serde(default)]
    pub app_password_hash: Option<String>,

    #[serde(default)]
    pub basic_user: Option<String>,

    #[serde(default)]
    pub basic_pass: Option<String>,

    /// Open `/api/signup` to visitors without a session
    #[serde(default)]
    pub allow_signup: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaSettings {
    #[serde(default = "default_signed_url_ttl_secs")]
    pub signed_url_ttl_secs: u64,

    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    #[serde(default = "default_session_artist")]
    pub session_artist: String,

    #[serde(default = "default_artwork_url")]
    pub artwork_url: String,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `config.toml` in the working directory.
    /// Environment variables use the `KEEPSAKE_` prefix with `__` between
    /// nested keys, e.g. `KEEPSAKE_AUTH__SESSION_SECRET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if let Some(path) = path {
            return Err(ServerError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("KEEPSAKE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.session_secret.is_empty() {
            return Err(ServerError::Config(
                "session secret is required (set KEEPSAKE_AUTH__SESSION_SECRET)".to_string(),
            ));
        }

        if self.storage.backend == StorageBackend::Remote {
            if is_blank(self.storage.remote_url.as_deref()) {
                return Err(ServerError::Config(
                    "remote storage requires storage.remote_url".to_string(),
                ));
            }
            if is_blank(self.storage.remote_service_key.as_deref()) {
                return Err(ServerError::Config(
                    "remote storage requires storage.remote_service_key".to_string(),
                ));
            }
        }

        if self.media.signed_url_ttl_secs == 0 {
            return Err(ServerError::Config(
                "media.signed_url_ttl_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// Basic gate credentials, when both halves are configured
    pub fn basic_credentials(&self) -> Option<(String, String)> {
        match (&self.auth.basic_user, &self.auth.basic_pass) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.clone(), pass.clone()))
            }
            _ => None,
        }
    }

    pub fn media_config(&self) -> MediaConfig {
        MediaConfig {
            signed_url_ttl: Duration::from_secs(self.media.signed_url_ttl_secs),
            list_limit: self.media.list_limit,
        }
    }

    /// Labels the player projects into the media session
    pub fn session_labels(&self) -> SessionLabels {
        let defaults = SessionLabels::default();
        SessionLabels {
            artist: self.media.session_artist.clone(),
            artwork: vec![Artwork {
                src: self.media.artwork_url.clone(),
                sizes: "512x512".to_string(),
                mime_type: mime_guess::from_path(&self.media.artwork_url)
                    .first_or(mime_guess::mime::IMAGE_PNG)
                    .to_string(),
            }],
            ..defaults
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        public_url: default_public_url(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        backend: default_backend(),
        objects_path: default_objects_path(),
        remote_url: None,
        remote_service_key: None,
    }
}

fn default_database_url() -> String {
    "sqlite://./data/keepsake.db".to_string()
}

fn default_backend() -> StorageBackend {
    StorageBackend::Local
}

fn default_objects_path() -> PathBuf {
    PathBuf::from("./data/objects")
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        session_secret: String::new(),
        session_ttl_hours: default_session_ttl_hours(),
        app_password_hash: None,
        basic_user: None,
        basic_pass: None,
        allow_signup: false,
    }
}

fn default_session_ttl_hours() -> u64 {
    24 * 7
}

fn default_media() -> MediaSettings {
    MediaSettings {
        signed_url_ttl_secs: default_signed_url_ttl_secs(),
        list_limit: default_list_limit(),
        session_artist: default_session_artist(),
        artwork_url: default_artwork_url(),
    }
}

fn default_signed_url_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_list_limit() -> usize {
    100
}

fn default_session_artist() -> String {
    "My Private Songs".to_string()
}

fn default_artwork_url() -> String {
    "/music-icon.png".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            media: default_media(),
        }
    }
}
