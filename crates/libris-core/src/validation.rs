//! # Validation Module
//!
//! Input validation for catalog and loan operations.
//!
//! ## Validation Strategy
//! ```text
//! Layer 1: THIS MODULE - field format and business-rule checks,
//!          always run before any storage access
//! Layer 2: Database (SQLite) - NOT NULL, UNIQUE and CHECK constraints
//!          as the last line of defense
//! ```
//!
//! Validation order matters to callers: the first failing check wins and
//! becomes the user-facing message.
//!
//! ## Usage
//! ```rust
//! use libris_core::validation::{validate_isbn, validate_patron_id};
//!
//! validate_isbn("9781234567890").unwrap();
//! validate_patron_id("123456").unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{ISBN_LEN, PATRON_ID_LEN};

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum author length in characters.
pub const MAX_AUTHOR_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a book title.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Returns
/// The trimmed title - this is what gets stored.
pub fn validate_title(title: &str) -> ValidationResult<&str> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required { field: "title" });
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title",
            max: MAX_TITLE_LEN,
        });
    }

    Ok(title)
}

/// Validates a book author.
///
/// Same rules as [`validate_title`] with a 100-character limit.
pub fn validate_author(author: &str) -> ValidationResult<&str> {
    let author = author.trim();

    if author.is_empty() {
        return Err(ValidationError::Required { field: "author" });
    }

    if author.chars().count() > MAX_AUTHOR_LEN {
        return Err(ValidationError::TooLong {
            field: "author",
            max: MAX_AUTHOR_LEN,
        });
    }

    Ok(author)
}

/// Validates an ISBN.
///
/// ## Rules
/// - Exactly 13 characters
/// - All ASCII digits (no dashes, no checksum verification)
///
/// ## Example
/// ```rust
/// use libris_core::validation::validate_isbn;
///
/// assert!(validate_isbn("9781234567890").is_ok());
/// assert!(validate_isbn("123").is_err());
/// assert!(validate_isbn("978-123456789").is_err());
/// ```
pub fn validate_isbn(isbn: &str) -> ValidationResult<()> {
    if isbn.len() != ISBN_LEN || !isbn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "isbn",
            reason: "must be exactly 13 digits",
        });
    }

    Ok(())
}

/// Validates a patron id (library card number).
///
/// ## Rules
/// - Exactly 6 characters
/// - All ASCII digits
pub fn validate_patron_id(patron_id: &str) -> ValidationResult<()> {
    if patron_id.len() != PATRON_ID_LEN || !patron_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "patron id",
            reason: "must be exactly 6 digits",
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a total-copies count.
///
/// ## Rules
/// - Must be positive (> 0); a catalog entry with zero copies is a data
///   entry mistake, not a valid state
pub fn validate_total_copies(copies: i64) -> ValidationResult<()> {
    if copies <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "total copies",
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  Dune  "), Ok("Dune"));
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(201)).is_err());
        assert!(validate_title(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_author() {
        assert_eq!(validate_author(" Frank Herbert "), Ok("Frank Herbert"));
        assert!(validate_author("").is_err());
        assert!(validate_author(&"A".repeat(101)).is_err());
        assert!(validate_author(&"A".repeat(100)).is_ok());
    }

    #[test]
    fn test_validate_isbn() {
        assert!(validate_isbn("9781234567890").is_ok());

        // Wrong length
        assert!(validate_isbn("978123456789").is_err());
        assert!(validate_isbn("97812345678901").is_err());
        assert!(validate_isbn("").is_err());

        // Non-numeric
        assert!(validate_isbn("97812345678-X").is_err());
        assert!(validate_isbn("abcdefghijklm").is_err());
    }

    #[test]
    fn test_isbn_errors_mention_isbn() {
        let msg = validate_isbn("123").unwrap_err().to_string();
        assert!(msg.contains("isbn"));
    }

    #[test]
    fn test_validate_patron_id() {
        assert!(validate_patron_id("123456").is_ok());
        assert!(validate_patron_id("000000").is_ok());

        assert!(validate_patron_id("12345").is_err());
        assert!(validate_patron_id("1234567").is_err());
        assert!(validate_patron_id("12345a").is_err());
        assert!(validate_patron_id("").is_err());
    }

    #[test]
    fn test_validate_total_copies() {
        assert!(validate_total_copies(1).is_ok());
        assert!(validate_total_copies(100).is_ok());
        assert!(validate_total_copies(0).is_err());
        assert!(validate_total_copies(-3).is_err());
    }
}
