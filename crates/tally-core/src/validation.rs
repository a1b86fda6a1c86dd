//! # Validation Module
//!
//! Presence checks for request fields.
//!
//! No format validation happens here: a field passes as long as it is
//! present, non-empty and fits in one spreadsheet cell. Whitespace counts
//! as content.
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::require;
//!
//! assert_eq!(require("email", Some("a@x.com".to_string())).unwrap(), "a@x.com");
//! assert!(require("email", Some(String::new())).is_err());
//! assert!(require("email", None).is_err());
//! ```

use crate::error::ValidationError;

/// Most characters a single `.xlsx` cell can hold.
pub const MAX_FIELD_CHARS: usize = 32_767;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Unwraps a required field.
///
/// ## Rules
/// - `None` (absent or `null`) → `Required`
/// - `""` → `Required`
/// - over [`MAX_FIELD_CHARS`] characters → `TooLong`
/// - anything else passes unchanged
pub fn require(field: &'static str, value: Option<String>) -> ValidationResult<String> {
    match value {
        Some(value) if value.chars().count() > MAX_FIELD_CHARS => Err(ValidationError::TooLong {
            field,
            max: MAX_FIELD_CHARS,
        }),
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::Required { field }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require("name", Some("Ann".to_string())), Ok("Ann".to_string()));
        assert_eq!(require("name", Some(" ".to_string())), Ok(" ".to_string()));

        assert_eq!(
            require("name", Some(String::new())),
            Err(ValidationError::Required { field: "name" })
        );
        assert_eq!(
            require("phone", None),
            Err(ValidationError::Required { field: "phone" })
        );
    }

    #[test]
    fn test_require_cell_limit() {
        let fits = "é".repeat(MAX_FIELD_CHARS);
        assert_eq!(require("name", Some(fits.clone())), Ok(fits));

        assert_eq!(
            require("name", Some("x".repeat(MAX_FIELD_CHARS + 1))),
            Err(ValidationError::TooLong {
                field: "name",
                max: MAX_FIELD_CHARS
            })
        );
    }
}
