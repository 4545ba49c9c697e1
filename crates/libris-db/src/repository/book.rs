//! # Book Repository
//!
//! Database operations for catalog entries.
//!
//! ## Key Operations
//! - Lookup by id and by ISBN (the business key)
//! - Full catalog listing in insertion order (the Search Service scans it)
//! - Guarded availability deltas
//!
//! ## Availability Deltas
//! ```text
//! WRONG: absolute update (read-modify-write race, can skip bounds)
//!    UPDATE books SET available_copies = 2 WHERE id = ?
//!
//! CORRECT: bounded delta in a single statement
//!    UPDATE books SET available_copies = available_copies + ?
//!    WHERE id = ? AND available_copies + ? BETWEEN 0 AND total_copies
//! ```
//! A delta that would leave the counter outside `0..=total_copies`
//! matches no rows and is reported as [`DbError::NoRowsAffected`].

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use libris_core::Book;

/// Repository for book database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = BookRepository::new(pool);
///
/// let book = repo.insert("Dune", "Frank Herbert", "9780441013593", 3).await?;
/// let same = repo.get_by_isbn("9780441013593").await?;
/// ```
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    /// Creates a new BookRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookRepository { pool }
    }

    /// Gets a book by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Book))` - Book found
    /// * `Ok(None)` - Book not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, isbn, total_copies, available_copies
            FROM books
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Gets a book by its ISBN (exact match on the business key).
    pub async fn get_by_isbn(&self, isbn: &str) -> DbResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, isbn, total_copies, available_copies
            FROM books
            WHERE isbn = ?1
            "#,
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Lists the whole catalog in insertion order.
    ///
    /// The Search Service filters this listing in memory; stable order is
    /// part of its contract.
    pub async fn list_all(&self) -> DbResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, isbn, total_copies, available_copies
            FROM books
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Inserts a new book and returns it with its assigned id.
    ///
    /// New entries start fully stocked: `available_copies = total_copies`.
    ///
    /// ## Returns
    /// * `Ok(Book)` - Inserted book
    /// * `Err(DbError::UniqueViolation)` - ISBN already exists
    pub async fn insert(
        &self,
        title: &str,
        author: &str,
        isbn: &str,
        total_copies: i64,
    ) -> DbResult<Book> {
        debug!(isbn = %isbn, title = %title, "Inserting book");

        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, isbn, total_copies, available_copies)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(isbn)
        .bind(total_copies)
        .execute(&self.pool)
        .await?;

        Ok(Book {
            id: result.last_insert_rowid(),
            title: title.to_string(),
            author: author.to_string(),
            isbn: isbn.to_string(),
            total_copies,
            available_copies: total_copies,
        })
    }

    /// Applies a bounded delta to a book's availability counter.
    ///
    /// The WHERE clause guarantees the counter never leaves
    /// `0..=total_copies`; an out-of-bounds delta (or unknown id) affects
    /// no rows and fails.
    ///
    /// ## Arguments
    /// * `id` - Book ID
    /// * `delta` - Change in available copies (-1 on borrow, +1 on return)
    pub async fn adjust_availability(&self, id: i64, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting availability");

        let result = sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies + ?2
            WHERE id = ?1
              AND available_copies + ?2 BETWEEN 0 AND total_copies
            "#,
        )
        .bind(id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::no_rows(format!(
                "availability change {delta:+} rejected for book {id}"
            )));
        }

        Ok(())
    }

    /// Counts catalog entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = test_db().await;
        let repo = db.books();

        let book = repo
            .insert("Dune", "Frank Herbert", "9780441013593", 3)
            .await
            .unwrap();
        assert_eq!(book.available_copies, 3);
        assert_eq!(book.total_copies, 3);

        let by_id = repo.get_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(by_id, book);

        let by_isbn = repo.get_by_isbn("9780441013593").await.unwrap().unwrap();
        assert_eq!(by_isbn, book);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
        assert!(repo.get_by_isbn("0000000000000").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_isbn_rejected() {
        let db = test_db().await;
        let repo = db.books();

        repo.insert("A", "B", "1111111111111", 1).await.unwrap();
        let err = repo.insert("C", "D", "1111111111111", 1).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_list_all_is_insertion_ordered() {
        let db = test_db().await;
        let repo = db.books();

        repo.insert("Zeta", "A", "1111111111111", 1).await.unwrap();
        repo.insert("Alpha", "B", "2222222222222", 1).await.unwrap();

        let titles: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["Zeta", "Alpha"]);
    }

    #[tokio::test]
    async fn test_adjust_availability_bounds() {
        let db = test_db().await;
        let repo = db.books();

        let book = repo.insert("T", "A", "1234567890123", 2).await.unwrap();

        repo.adjust_availability(book.id, -1).await.unwrap();
        repo.adjust_availability(book.id, -1).await.unwrap();

        // Counter is at 0: another decrement must be rejected
        let err = repo.adjust_availability(book.id, -1).await.unwrap_err();
        assert!(matches!(err, DbError::NoRowsAffected(_)));
        let current = repo.get_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(current.available_copies, 0);

        repo.adjust_availability(book.id, 1).await.unwrap();
        repo.adjust_availability(book.id, 1).await.unwrap();

        // Counter is back at total: increment past total must be rejected
        let err = repo.adjust_availability(book.id, 1).await.unwrap_err();
        assert!(matches!(err, DbError::NoRowsAffected(_)));
        let current = repo.get_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(current.available_copies, 2);
    }
}
