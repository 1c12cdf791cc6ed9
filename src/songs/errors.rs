//! # Song Errors
//!
//! Failure kinds raised by the payload validator and the data service, and
//! their translation into HTTP responses.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for song operations
pub type SongResult<T> = Result<T, SongError>;

/// Message returned to clients for failures that are not their fault
pub const GENERIC_SERVER_MESSAGE: &str = "Sorry, something went wrong on our server";

/// Details of a rejected payload field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field name as it appears in the payload (`$body` for the body itself)
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// What was found instead
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field to be present", "missing")
    }

    pub fn extra_field(field: impl Into<String>) -> Self {
        Self::new(field, "no undeclared fields", "extra field present")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    pub fn out_of_range(field: impl Into<String>, expected: impl Into<String>, actual: i64) -> Self {
        Self::new(field, expected, actual.to_string())
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field '{}': expected {}, got {}",
            self.field, self.expected, self.actual
        )
    }
}

/// Song operation failures
#[derive(Debug, Error)]
pub enum SongError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Payload rejected before reaching the service
    #[error("Invalid song payload: {0}")]
    Validation(ValidationDetails),

    /// No row matched the requested id
    #[error("{0}")]
    NotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// A storage post-condition did not hold
    #[error("{0}")]
    Invariant(String),

    /// Any driver failure not classified above
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl SongError {
    pub fn validation(details: ValidationDetails) -> Self {
        SongError::Validation(details)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        SongError::NotFound(message.into())
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        SongError::Invariant(message.into())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SongError::Validation(_) => StatusCode::BAD_REQUEST,
            SongError::NotFound(_) => StatusCode::NOT_FOUND,
            SongError::Invariant(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SongError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller caused this failure
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Message safe to show to API clients
    pub fn public_message(&self) -> String {
        match self {
            SongError::Database(_) => GENERIC_SERVER_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Failure envelope: `fail` for client errors, `error` for server errors
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl From<&SongError> for ErrorResponse {
    fn from(err: &SongError) -> Self {
        Self {
            status: if err.is_client_error() { "fail" } else { "error" },
            message: err.public_message(),
        }
    }
}

impl IntoResponse for SongError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            SongError::Database(e) => tracing::error!(error = %e, "database failure"),
            SongError::Invariant(msg) => tracing::error!(reason = %msg, "storage invariant violated"),
            SongError::Validation(details) => tracing::debug!(%details, "payload rejected"),
            SongError::NotFound(msg) => tracing::debug!(reason = %msg, "song not found"),
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
