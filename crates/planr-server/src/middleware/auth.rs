//! Authentication middleware for planr-server.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use planr_core::types::ErrorBody;
use std::sync::Arc;
use tracing::{debug, error};

use crate::state::AppState;
use crate::tokens::hash_key;

/// Authenticated caller, scoped to one organization
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: String,
    pub org_id: String,
    pub token_id: String,
}

impl AuthContext {
    /// Whether a record owned by (`user_id`, `org_id`) belongs to this caller
    pub fn owns(&self, user_id: &str, org_id: &str) -> bool {
        self.user_id == user_id && self.org_id == org_id
    }
}

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Internal,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error, code) = match self {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing authentication token",
                "MISSING_TOKEN",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid authentication token",
                "INVALID_TOKEN",
            ),
            AuthError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Token lookup failed",
                "INTERNAL_ERROR",
            ),
        };

        let body = Json(ErrorBody {
            error: error.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}

/// Authentication middleware for axum
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token_str = match request.headers().get(AUTHORIZATION) {
        Some(value) => value.to_str().map_err(|_| AuthError::InvalidToken)?,
        None => return Err(AuthError::MissingToken),
    };

    // Remove "Bearer " prefix if present
    let token_str = token_str.trim_start_matches("Bearer ").trim();
    if token_str.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let token = state
        .db
        .find_cli_token_by_hash(&hash_key(token_str))
        .map_err(|e| {
            error!("Token lookup failed: {}", e);
            AuthError::Internal
        })?
        .ok_or(AuthError::InvalidToken)?;

    debug!("Authenticated token {} for user {}", token.id, token.user_id);

    request.extensions_mut().insert(AuthContext {
        user_id: token.user_id,
        org_id: token.org_id,
        token_id: token.id,
    });

    Ok(next.run(request).await)
}
