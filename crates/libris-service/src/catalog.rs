//! # Catalog Manager
//!
//! Validates and inserts new catalog entries.
//!
//! ## Add-Book Flow
//! ```text
//! add_book(title, author, isbn, total_copies)
//!      │
//!      ├── title empty / too long?   → Validation error (first wins)
//!      ├── author empty / too long?  → Validation error
//!      ├── isbn not 13 digits?       → Validation error
//!      ├── total_copies <= 0?        → Validation error
//!      ├── ISBN already in catalog?  → DuplicateIsbn
//!      │
//!      ▼
//!  INSERT with available_copies = total_copies
//! ```

use std::fmt;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use libris_core::validation::{
    validate_author, validate_isbn, validate_title, validate_total_copies,
};
use libris_core::Book;
use libris_db::{BookRepository, Database, DbError};

/// Confirmation of a successful catalog insertion.
///
/// `Display` renders the human-readable confirmation with the trimmed
/// title, exactly as a front end would show it.
#[derive(Debug, Clone)]
pub struct CatalogReceipt {
    /// The stored book, with its assigned id and trimmed title/author.
    pub book: Book,
}

impl fmt::Display for CatalogReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book \"{}\" has been successfully added to the catalog.",
            self.book.title
        )
    }
}

/// The Catalog Manager service.
#[derive(Debug, Clone)]
pub struct CatalogService {
    books: BookRepository,
}

impl CatalogService {
    /// Creates a catalog service over the given storage handle.
    pub fn new(db: &Database) -> Self {
        CatalogService { books: db.books() }
    }

    /// Adds a new book to the catalog.
    ///
    /// Validation runs in a fixed order and the first failure wins: title,
    /// author, ISBN format, total copies, then the duplicate-ISBN check.
    /// On success the entry is stored fully stocked
    /// (`available_copies = total_copies`) with trimmed title and author.
    pub async fn add_book(
        &self,
        title: &str,
        author: &str,
        isbn: &str,
        total_copies: i64,
    ) -> ServiceResult<CatalogReceipt> {
        let title = validate_title(title)?;
        let author = validate_author(author)?;
        validate_isbn(isbn)?;
        validate_total_copies(total_copies)?;

        if self.books.get_by_isbn(isbn).await?.is_some() {
            return Err(ServiceError::DuplicateIsbn);
        }

        let book = self
            .books
            .insert(title, author, isbn, total_copies)
            .await
            .map_err(|e| match e {
                // Backstop for an insert racing the duplicate check
                DbError::UniqueViolation { .. } => ServiceError::DuplicateIsbn,
                other => ServiceError::Db(other),
            })?;

        info!(book_id = book.id, isbn = %book.isbn, "Book added to catalog");
        Ok(CatalogReceipt { book })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
