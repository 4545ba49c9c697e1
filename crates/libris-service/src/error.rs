//! # Service Error Type
//!
//! Unified error type for the business-logic services.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Error Taxonomy                                │
//! │                                                                     │
//! │  (a) validation errors   - malformed title/author/isbn/patron id,   │
//! │      caught before any storage access                               │
//! │  (b) not-found errors    - unknown book, no matching open loan      │
//! │  (c) business-rule       - no copies available, loan limit,         │
//! │      violations            duplicate ISBN                           │
//! │  (d) storage failures    - surfaced as a generic database error,    │
//! │                            not retried                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant's `Display` is the user-facing message, so callers can
//! hand `err.to_string()` straight to a front end. No user-input problem
//! ever panics.

use thiserror::Error;

use libris_core::ValidationError;
use libris_db::DbError;

/// Failures of catalog, loan, search and report operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input (title, author, ISBN, total copies, patron id).
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No book with the requested id exists.
    #[error("Book not found.")]
    BookNotFound,

    /// The book exists but no copy is on the shelf.
    #[error("This book is currently not available.")]
    BookUnavailable,

    /// The patron already holds the maximum number of open loans.
    #[error("You have reached the maximum borrowing limit of {max} books.")]
    BorrowLimitReached { max: i64 },

    /// A catalog entry with this ISBN already exists.
    #[error("A book with this ISBN already exists.")]
    DuplicateIsbn,

    /// The patron holds no open loan of this book.
    #[error("This book was not borrowed by this patron or has already been returned.")]
    NotBorrowed,

    /// Storage-layer failure, surfaced generically.
    #[error("A database error occurred: {0}")]
    Db(#[from] DbError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;
