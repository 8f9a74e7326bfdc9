//! Centralized API error handling
//!
//! One error type covers every failure the pipeline can surface. Client
//! faults (validation, auth) serialize as `{"error": ...}`; dependency and
//! internal faults serialize as `{"error": ..., "details": ...}` so the
//! caller always receives a structured body, never a bare status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or incomplete transaction payload (client fault)
    #[error("{0}")]
    Validation(String),

    /// Missing API key
    #[error("{0}")]
    Unauthorized(String),

    /// Wrong API key
    #[error("{0}")]
    Forbidden(String),

    /// The remote risk classifier failed or answered nonsense
    #[error("{0}")]
    ExternalService(String),

    /// Row store failure
    #[error("{0}")]
    Database(String),

    /// Anything else that should never happen
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ExternalService(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether this error is the service's fault rather than the caller's
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            ApiError::ExternalService(_) | ApiError::Database(_) | ApiError::Internal(_)
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        let body = if self.is_server_fault() {
            tracing::error!(error = %message, status = %status.as_u16(), "Request failed");
            json!({ "error": "Internal server error", "details": message })
        } else {
            tracing::debug!(error = %message, status = %status.as_u16(), "Request rejected");
            json!({ "error": message })
        };

        (status, Json(body)).into_response()
    }
}

// Convenience conversions from common error types

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON serialization failed: {}", err))
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;
