//! Account and session HTTP handlers.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use tastetales_core::AccountRepository;

use crate::{ApiError, AppState, MaybeUser};

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub display_name: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a freshly established session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub username: String,
    pub display_name: String,
}

/// Create an account and establish a session.
///
/// # Returns
/// - 201 Created with the session token
/// - 400 Bad Request when username or password is empty after trimming
/// - 409 Conflict when the username is taken (case-sensitive)
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let username = req.username.trim();
    let password = req.password.trim();
    let display_name = req.display_name.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::BadRequest(
            "Username and password required".to_string(),
        ));
    }

    let account = state
        .db
        .accounts
        .register(username, password, display_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: state.signer.issue(username),
            username: username.to_string(),
            display_name: account.display_name,
        }),
    ))
}

/// Verify credentials and establish a session.
///
/// # Returns
/// - 200 OK with the session token
/// - 401 Unauthorized with one fixed message, whether the username is
///   unknown or the password is wrong
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let username = req.username.trim();
    let account = state
        .db
        .accounts
        .authenticate(username, req.password.trim())
        .await?;

    Ok(Json(SessionResponse {
        token: state.signer.issue(username),
        username: username.to_string(),
        display_name: account.display_name,
    }))
}

/// End the session. Tokens are stateless, so this only confirms; the client
/// drops the token.
pub async fn logout() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "logged out" }))
}

/// Report the current session's username, or null when anonymous.
pub async fn whoami(MaybeUser(username): MaybeUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "username": username }))
}
