/// Authentication API routes
use crate::{
    error::Result,
    middleware::auth::{cleared_session_cookie, session_cookie, session_token},
    services::auth::LoginMethod,
    state::AppState,
};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use keepsake_core::{Account, KeepsakeError, NewAccount};
use serde::{Deserialize, Serialize};
use serde_json::json;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Present for account logins, absent for the shared app password
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
}

fn has_session(app_state: &AppState, headers: &HeaderMap) -> bool {
    session_token(headers).is_some_and(|token| app_state.auth_service.verify_session(token).is_ok())
}

/// GET /api/auth
pub async fn check(State(app_state): State<AppState>, headers: HeaderMap) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: has_session(&app_state, &headers),
    })
}

/// POST /api/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Response> {
    let auth = &app_state.auth_service;

    let (token, method) = match req.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        Some(email) => {
            let Some((account, hash)) = app_state.accounts.find_account_by_email(email).await?
            else {
                return Ok(rejected(StatusCode::UNAUTHORIZED, "Invalid email or password"));
            };
            if !auth.verify_password(&req.password, &hash)? {
                return Ok(rejected(StatusCode::UNAUTHORIZED, "Invalid email or password"));
            }
            tracing::info!(account = %account.id, "Account signed in");
            (
                auth.create_account_session(account.id.as_str())?,
                LoginMethod::Account,
            )
        }
        None => {
            if !auth.verify_app_password(&req.password)? {
                return Ok(rejected(StatusCode::UNAUTHORIZED, "Invalid password"));
            }
            tracing::info!("Signed in with app password");
            (auth.create_app_session()?, LoginMethod::AppPassword)
        }
    };

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&token, auth.session_ttl_secs()),
        )],
        Json(json!({ "success": true, "method": method })),
    )
        .into_response())
}

/// POST /api/logout
pub async fn logout() -> Response {
    (
        [(header::SET_COOKIE, cleared_session_cookie())],
        Json(json!({ "success": true })),
    )
        .into_response()
}

/// POST /api/signup
///
/// Closed to visitors unless `auth.allow_signup` is set; a signed-in user
/// can always add accounts.
pub async fn signup(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SignupRequest>,
) -> Result<Response> {
    if !app_state.allow_signup && !has_session(&app_state, &headers) {
        tracing::warn!("Rejected signup without a session");
        return Ok(rejected(StatusCode::FORBIDDEN, "Signup is disabled"));
    }

    if let Err(message) = validate_signup(&req) {
        return Ok(rejected(StatusCode::BAD_REQUEST, message));
    }

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    let created = app_state
        .accounts
        .create_account(NewAccount {
            email: req.email.trim().to_string(),
            username: req.username.trim().to_string(),
            password_hash,
        })
        .await;

    match created {
        Ok(account) => Ok(signed_up(&account)),
        Err(KeepsakeError::Duplicate(_)) => Ok(rejected(
            StatusCode::BAD_REQUEST,
            "An account with this email already exists",
        )),
        Err(e) => Err(e.into()),
    }
}

fn validate_signup(req: &SignupRequest) -> std::result::Result<(), &'static str> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("A valid email is required");
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters");
    }
    if req.username.trim().is_empty() {
        return Err("Username is required");
    }
    Ok(())
}

fn signed_up(account: &Account) -> Response {
    tracing::info!(account = %account.id, "Account created");
    Json(json!({ "success": true, "user": account })).into_response()
}

fn rejected(status: StatusCode, error: &str) -> Response {
    (status, Json(json!({ "success": false, "error": error }))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str, username: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(validate_signup(&request("me@example.com", "longenough", "me")).is_ok());
        assert!(validate_signup(&request("not-an-email", "longenough", "me")).is_err());
        assert!(validate_signup(&request("me@example.com", "short", "me")).is_err());
        assert!(validate_signup(&request("me@example.com", "longenough", "  ")).is_err());
    }
}
