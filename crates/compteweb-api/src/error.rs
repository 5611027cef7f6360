//! Error types for compteweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use compteweb_core::{CoreError, ErrorCode};
use thiserror::Error;

/// Stable error codes of the JSON API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    NotFound,
    BadRequest,
    UpstreamFailed,
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorCode::NotFound => write!(f, "NOT_FOUND"),
            ApiErrorCode::BadRequest => write!(f, "BAD_REQUEST"),
            ApiErrorCode::UpstreamFailed => write!(f, "UPSTREAM_FAILED"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// The banking service failed or rejected the operation
    #[error("{message}")]
    Upstream { message: String },
}

impl ApiError {
    pub fn code(&self) -> ApiErrorCode {
        match self {
            ApiError::NotFound { .. } => ApiErrorCode::NotFound,
            ApiError::BadRequest { .. } => ApiErrorCode::BadRequest,
            ApiError::Upstream { .. } => ApiErrorCode::UpstreamFailed,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err.code() {
            ErrorCode::ValidationFailed => ApiError::BadRequest { message: err.to_string() },
            ErrorCode::QueryFailed | ErrorCode::MutationFailed => ApiError::Upstream { message: err.to_string() },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.to_string(),
            "code": self.code().to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
