//! # Error Types
//!
//! Validation error types for libris-core.
//!
//! ## Error Hierarchy
//! ```text
//! libris-core (this file)
//! └── ValidationError  - Input validation failures
//!
//! libris-db (separate crate)
//! └── DbError          - Database operation failures
//!
//! libris-service (separate crate)
//! └── ServiceError     - What the front end sees (wraps both)
//!
//! Flow: ValidationError → ServiceError → front end
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the field name in the message so callers can surface it
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. They are always
/// raised before any storage access happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty after trimming.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be a positive integer.
    #[error("{field} must be a positive integer")]
    MustBePositive { field: &'static str },

    /// Invalid format (wrong length, non-numeric characters, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Required { field: "title" };
        assert_eq!(err.to_string(), "title is required");

        let err = ValidationError::TooLong {
            field: "author",
            max: 100,
        };
        assert_eq!(err.to_string(), "author must be at most 100 characters");

        let err = ValidationError::InvalidFormat {
            field: "isbn",
            reason: "must be exactly 13 digits",
        };
        assert_eq!(
            err.to_string(),
            "isbn has invalid format: must be exactly 13 digits"
        );
    }
}
