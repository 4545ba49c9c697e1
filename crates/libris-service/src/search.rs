//! # Search Service
//!
//! Linear filter over the catalog by field.
//!
//! ## Matching Rules
//! ```text
//! field    rule
//! ─────    ──────────────────────────────────────────────
//! title    case-insensitive substring (term trimmed)
//! author   case-insensitive substring (term trimmed)
//! isbn     case-insensitive exact equality
//! other    empty result - an unknown field is not an error
//! ```
//!
//! Results come back in the catalog's insertion order and no field value
//! is mutated. The catalog is small enough that an in-memory scan beats
//! maintaining a search index.

use crate::error::ServiceResult;
use libris_core::{Book, SearchField};
use libris_db::{BookRepository, Database};

/// The Search Service.
#[derive(Debug, Clone)]
pub struct SearchService {
    books: BookRepository,
}

impl SearchService {
    /// Creates a search service over the given storage handle.
    pub fn new(db: &Database) -> Self {
        SearchService { books: db.books() }
    }

    /// Searches the catalog for `term` within the named field.
    ///
    /// A field name other than `title`, `author` or `isbn` yields an
    /// empty result.
    pub async fn search(&self, term: &str, field: &str) -> ServiceResult<Vec<Book>> {
        let Ok(field) = field.parse::<SearchField>() else {
            return Ok(Vec::new());
        };

        let needle = term.trim().to_lowercase();
        let books = self.books.list_all().await?;

        Ok(books
            .into_iter()
            .filter(|book| match field {
                SearchField::Title => book.title.to_lowercase().contains(&needle),
                SearchField::Author => book.author.to_lowercase().contains(&needle),
                SearchField::Isbn => book.isbn.to_lowercase() == needle,
            })
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
