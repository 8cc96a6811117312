//! Error types for fitrep-fa
//!
//! [`AnalysisError`] classifies every way a frame can fail to produce a rep
//! classification. The pipeline converts each kind into an in-band result
//! status, so none of them reach HTTP callers as failures.
//!
//! [`ApiError`] covers request-level problems on the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Frame-level analysis failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Landmark set absent or empty
    #[error("No person detected in frame")]
    NoPersonDetected,

    /// Landmark sequence present but unusable
    #[error("Malformed landmarks: {0}")]
    MalformedLandmarks(String),

    /// Exercise type outside the supported set
    #[error("Exercise type not supported: {0}")]
    UnsupportedExerciseType(String),
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
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
