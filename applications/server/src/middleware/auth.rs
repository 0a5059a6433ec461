/// Authentication middleware
use crate::{
    error::ServerError,
    services::auth::{Claims, SESSION_COOKIE},
    state::AppState,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Claims of the session cookie, stored in request extensions
/// Can be used as an extractor in handlers
#[derive(Debug, Clone)]
pub struct Session(pub Claims);

impl Session {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

/// Value of the session cookie, if the request carries one
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}")
}

/// `Set-Cookie` value removing the session
pub fn cleared_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Middleware that validates the session cookie
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let token = session_token(request.headers())
        .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))?;

    let claims = state.auth_service.verify_session(token).map_err(|e| {
        tracing::warn!("Session verification failed: {}", e);
        ServerError::Auth("Not authenticated".to_string())
    })?;

    request.extensions_mut().insert(Session(claims));

    Ok(next.run(request).await)
}

/// Site-wide HTTP Basic gate; a no-op unless credentials are configured
pub async fn basic_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some((user, pass)) = &state.basic_credentials else {
        return next.run(request).await;
    };

    match basic_credentials(request.headers()) {
        Some((u, p)) if u == *user && p == *pass => next.run(request).await,
        _ => {
            let mut response = (StatusCode::UNAUTHORIZED, "Auth required").into_response();
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static("Basic realm=\"Secure Area\""),
            );
            response
        }
    }
}

/// Decode `Authorization: Basic ...` into user and password
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Implement FromRequestParts so Session can be used as an extractor
#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| ServerError::Auth("Not authenticated".to_string()))
    }
}
