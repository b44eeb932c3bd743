//! Error types for locsync-ingest
//!
//! Two kinds of failure escalate to the HTTP caller: structurally invalid
//! payloads (400, acknowledged as a client error so the sender stops
//! retrying) and storage failures (500, not acknowledged so the sender
//! retries). Everything else is resolved locally during normalization.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Malformed webhook payload (400) - sender should not retry
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Storage failure (500) - delivery unacknowledged, sender may retry
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// locsync-common error
    #[error("Common error: {0}")]
    Common(#[from] locsync_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Common errors carry their own classification
        if let ApiError::Common(err) = self {
            return match err {
                locsync_common::Error::InvalidPayload(msg) => {
                    ApiError::InvalidPayload(msg).into_response()
                }
                locsync_common::Error::NotFound(msg) => ApiError::NotFound(msg).into_response(),
                locsync_common::Error::Database(e) => ApiError::Storage(e).into_response(),
                other => ApiError::Internal(other.to_string()).into_response(),
            };
        }

        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::InvalidPayload(msg) => (StatusCode::BAD_REQUEST, "INVALID_PAYLOAD", msg),
            ApiError::Storage(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORAGE_ERROR",
                err.to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Common(_) => unreachable!("handled above"),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
