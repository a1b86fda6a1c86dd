//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  └── ValidationError  - Request presence checks                        │
//! │                                                                         │
//! │  tally-store errors (separate crate)                                   │
//! │  └── StoreError       - Unavailable file, duplicate value              │
//! │                                                                         │
//! │  API errors (in apps/api)                                              │
//! │  └── ApiError         - What the HTTP client sees                      │
//! │                                                                         │
//! │  Flow: ValidationError / StoreError → ApiError → JSON body             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any storage call, so a request that fails validation
/// never touches a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent, `null`, or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A field is longer than a spreadsheet cell can hold.
    ///
    /// ## When This Occurs
    /// - Any request field over 32,767 characters
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field } | ValidationError::TooLong { field, .. } => {
                field
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
