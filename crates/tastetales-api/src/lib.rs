//! # tastetales-api
//!
//! HTTP API layer for tastetales. The binary in `main.rs` reads
//! configuration and serves the [`app`] router; everything the router needs
//! lives here so integration tests can drive it in-process.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use tastetales_store::Database;

pub mod handlers;
pub mod session;

pub use session::SessionSigner;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Flat-file database (recipes + accounts).
    pub db: Arc<Database>,
    /// Session token signer.
    pub signer: SessionSigner,
    /// Directory where accepted image uploads land.
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(db: Database, signer: SessionSigner, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            db: Arc::new(db),
            signer,
            upload_dir: upload_dir.into(),
        }
    }
}

/// Build the API router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/recipes",
            get(handlers::recipes::search_recipes).post(handlers::recipes::create_recipe),
        )
        .route(
            "/api/recipes/:id",
            get(handlers::recipes::get_recipe).delete(handlers::recipes::delete_recipe),
        )
        .route(
            "/api/recipes/:id/favorite",
            post(handlers::recipes::toggle_favorite),
        )
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/whoami", get(handlers::auth::whoami))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SESSION EXTRACTORS
// =============================================================================

/// Optional identity: the verified username from a `Bearer` token, if any.
///
/// An absent header, a malformed header, and a bad signature all read as
/// anonymous rather than as errors.
pub struct MaybeUser(pub Option<String>);

/// Required identity. Rejects with 401 when [`MaybeUser`] is anonymous.
pub struct AuthUser(pub String);

#[async_trait::async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let username = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| state.signer.verify(token));
        Ok(MaybeUser(username))
    }
}

#[async_trait::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeUser(username) = MaybeUser::from_request_parts(parts, state)
            .await
            .expect("MaybeUser is infallible");
        username
            .map(AuthUser)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

/// HTTP-facing error with the status code already decided.
#[derive(Debug)]
pub enum ApiError {
    Internal(tastetales_core::Error),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    BadRequest(String),
    Conflict(String),
}

impl From<tastetales_core::Error> for ApiError {
    fn from(err: tastetales_core::Error) -> Self {
        use tastetales_core::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::RecipeNotFound(id) => ApiError::NotFound(format!("Recipe {id} not found")),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::AccountMissing(_) => ApiError::BadRequest("User record missing".to_string()),
            // One message for unknown-user and wrong-password alike.
            Error::InvalidCredentials => ApiError::Unauthorized("Invalid credentials".to_string()),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::Forbidden(_) => ApiError::Forbidden("Permission denied".to_string()),
            Error::UsernameTaken(_) => ApiError::Conflict("Username already exists".to_string()),
            err => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
