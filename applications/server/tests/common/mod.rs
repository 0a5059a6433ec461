/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use keepsake_server::{api, AppState, Backends, ServerConfig};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub mod fixtures {
    pub const APP_PASSWORD: &str = "open sesame";
    pub const SESSION_SECRET: &str = "test-secret-key";
    pub const PUBLIC_URL: &str = "http://keepsake.test";
}

/// Router over a real SQLite file and a local object store in a temp dir
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub config: ServerConfig,
    _temp_dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.server.public_url = fixtures::PUBLIC_URL.to_string();
    config.storage.database_url = format!("sqlite://{}", dir.path().join("test.db").display());
    config.storage.objects_path = dir.path().join("objects");
    config.auth.session_secret = fixtures::SESSION_SECRET.to_string();
    // Low cost keeps the suite fast
    config.auth.app_password_hash = Some(bcrypt::hash(fixtures::APP_PASSWORD, 4).unwrap());
    config
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(adjust: impl FnOnce(&mut ServerConfig)) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir);
        adjust(&mut config);

        let backends = Backends::from_config(&config).await.unwrap();
        let state = AppState::new(&config, backends);
        let router = api::router(state.clone());

        Self {
            router,
            state,
            config,
            _temp_dir: temp_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Log in with the app password and return the session cookie pair
    pub async fn login(&self) -> String {
        let response = self
            .send(json_request(
                "POST",
                "/api/login",
                None,
                &serde_json::json!({ "password": fixtures::APP_PASSWORD }),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie_pair(&response).unwrap()
    }
}

/// `name=value` part of the response's Set-Cookie header
pub fn session_cookie_pair<B>(response: &Response<B>) -> Option<String> {
    let cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    cookie.split(';').next().map(str::to_string)
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn bytes_request(
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(bytes.to_vec())).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
