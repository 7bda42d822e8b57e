//! Handler error type rendered as `{error, code}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use planr_core::types::ErrorBody;
use tracing::error;

#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub error: String,
    pub code: &'static str,
}

impl ApiFailure {
    pub fn new(status: StatusCode, error: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            error: error.into(),
            code,
        }
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error, "NOT_FOUND")
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, "BAD_REQUEST")
    }
}

impl From<planr_core::Error> for ApiFailure {
    fn from(e: planr_core::Error) -> Self {
        error!("Request failed: {}", e);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), "INTERNAL_ERROR")
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.error,
            code: self.code.to_string(),
        });
        (self.status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiFailure>;
