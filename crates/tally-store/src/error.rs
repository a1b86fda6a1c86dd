//! # Store Error Types
//!
//! Error types for table operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  calamine::XlsxError / rust_xlsxwriter::XlsxError / std::io::Error     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError::Unavailable { path, reason } ← Adds the file path         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in apps/api) ← 500, reason logged not returned              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use thiserror::Error;

/// Table operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be opened, parsed or written.
    ///
    /// ## When This Occurs
    /// - File is corrupt or not an .xlsx workbook
    /// - Workbook has no sheets
    /// - Permission denied, disk full, invalid path
    #[error("Storage unavailable at {path}: {reason}")]
    Unavailable { path: String, reason: String },

    /// A unique column already holds the value.
    ///
    /// ## When This Occurs
    /// - Signup with an email or username already on file
    /// - Subscribing an email twice
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Store configuration is invalid.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// A blocking storage task panicked or was cancelled.
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Creates an Unavailable error for `path`.
    pub fn unavailable(path: &Path, reason: impl ToString) -> Self {
        StoreError::Unavailable {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Returns the field name if this is a UniqueViolation.
    pub fn duplicate_field(&self) -> Option<&str> {
        match self {
            StoreError::UniqueViolation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::Internal(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
