//! Error types for the listings server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == Api Error Enum ==
/// Unified error type for the listings server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource file missing or id absent
    #[error("{0}")]
    NotFound(String),

    /// API credentials missing or invalid on a protected path
    #[error("{0}")]
    Unauthorized(String),

    /// Filesystem failure while reading or rewriting a store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a store file or response body
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            // Internal failures get a generic body; the detail stays server-side.
            ApiError::Io(_) | ApiError::Json(_) | ApiError::Internal(_) => {
                error!("request failed: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process data".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the listings server.
pub type Result<T> = std::result::Result<T, ApiError>;
