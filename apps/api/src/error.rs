//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally                                  │
//! │                                                                         │
//! │  Handler: Result<Json<T>, ApiError>                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Body not JSON?    ─── JsonRejection ─────────────► MALFORMED_REQUEST  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Field missing?    ─── ValidationError ───────────► VALIDATION_ERROR   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Already on file?  ─── StoreError::UniqueViolation ► CONFLICT          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  File unreadable?  ─── StoreError::Unavailable ───► STORAGE_UNAVAILABLE│
//! │         │                                             (reason logged)  │
//! │         ▼                                                               │
//! │  Success ─────────────────────────────────────────► 200 + JSON body    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! {
//!   "code": "CONFLICT",
//!   "message": "Email already exists!"
//! }
//! ```

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tally_core::ValidationError;
use tally_store::StoreError;

/// Error returned from route handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request field missing or too long (400)
    ValidationError,

    /// Unique value already on file (400)
    Conflict,

    /// Login email/password did not match (400)
    InvalidCredentials,

    /// Resource not found (404)
    NotFound,

    /// Body or query could not be parsed (400)
    MalformedRequest,

    /// Table file could not be read or written (500)
    StorageUnavailable,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError
            | ErrorCode::Conflict
            | ErrorCode::InvalidCredentials
            | ErrorCode::MalformedRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::StorageUnavailable | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Conflict, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Maps a failed `validate()`. Missing fields get the route's own
    /// `required` message; other failures carry the validation text.
    pub fn invalid(err: ValidationError, required: &str) -> Self {
        match err {
            ValidationError::Required { .. } => ApiError::validation(required),
            other => ApiError::validation(other.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts store errors to API errors.
///
/// Handlers that give duplicates a specific message match
/// `UniqueViolation` themselves before falling back to this.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { field, value } => {
                ApiError::conflict(format!("{} '{}' already exists", field, value))
            }
            StoreError::Unavailable { path, reason } => {
                // Log the actual error but return a generic message
                tracing::error!(path = %path, reason = %reason, "Storage unavailable");
                ApiError::new(ErrorCode::StorageUnavailable, "Storage unavailable")
            }
            StoreError::InvalidConfig(e) => {
                tracing::error!("Invalid store configuration: {}", e);
                ApiError::new(ErrorCode::Internal, "Internal server error")
            }
            StoreError::Internal(e) => {
                tracing::error!("Internal store error: {}", e);
                ApiError::new(ErrorCode::Internal, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorCode::MalformedRequest, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(ErrorCode::MalformedRequest, rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;
