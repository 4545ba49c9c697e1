//! # Loan Repository
//!
//! Database operations for borrow records.
//!
//! ## Borrow/Return Transactions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      record_borrow                                  │
//! │                                                                     │
//! │  BEGIN                                                              │
//! │    INSERT borrow_record (borrow_date, due_date, return_date NULL)   │
//! │    UPDATE books SET available_copies -= 1                           │
//! │           WHERE available_copies > 0          ← guard               │
//! │    rows_affected == 0 ? ROLLBACK : COMMIT                           │
//! │                                                                     │
//! │                      record_return                                  │
//! │                                                                     │
//! │  BEGIN                                                              │
//! │    UPDATE borrow_record SET return_date WHERE return_date IS NULL   │
//! │    rows_affected == 0 ? ROLLBACK (nothing was open)                 │
//! │    UPDATE books SET available_copies += 1                           │
//! │           WHERE available_copies < total_copies ← guard             │
//! │    COMMIT                                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fusing the record write and the counter delta into one transaction
//! means a borrow can never persist a record without taking a copy off
//! the shelf, and a return can never close a record without putting one
//! back.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use libris_core::{BorrowRecord, LoanHistoryRecord, OpenLoan};

/// Repository for borrow-record database operations.
#[derive(Debug, Clone)]
pub struct LoanRepository {
    pool: SqlitePool,
}

impl LoanRepository {
    /// Creates a new LoanRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LoanRepository { pool }
    }

    /// Finds the unique open borrow record for a (patron, book) pair.
    ///
    /// ## Returns
    /// * `Ok(Some(BorrowRecord))` - The patron currently holds this book
    /// * `Ok(None)` - Never borrowed, or already returned
    pub async fn get_open(&self, patron_id: &str, book_id: i64) -> DbResult<Option<BorrowRecord>> {
        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            SELECT id, patron_id, book_id, borrow_date, due_date, return_date
            FROM borrow_records
            WHERE patron_id = ?1 AND book_id = ?2 AND return_date IS NULL
            "#,
        )
        .bind(patron_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Counts a patron's currently open loans.
    pub async fn open_count(&self, patron_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM borrow_records
            WHERE patron_id = ?1 AND return_date IS NULL
            "#,
        )
        .bind(patron_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Lists a patron's open loans joined with book title/author.
    pub async fn open_loans(&self, patron_id: &str) -> DbResult<Vec<OpenLoan>> {
        let loans = sqlx::query_as::<_, OpenLoan>(
            r#"
            SELECT br.book_id, b.title, b.author, br.borrow_date, br.due_date
            FROM borrow_records br
            JOIN books b ON br.book_id = b.id
            WHERE br.patron_id = ?1 AND br.return_date IS NULL
            ORDER BY br.borrow_date DESC
            "#,
        )
        .bind(patron_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Lists a patron's full borrow history (open and closed loans),
    /// newest borrow first, joined with book title/author.
    pub async fn history(&self, patron_id: &str) -> DbResult<Vec<LoanHistoryRecord>> {
        let rows = sqlx::query_as::<_, LoanHistoryRecord>(
            r#"
            SELECT b.title, b.author, br.borrow_date, br.return_date
            FROM borrow_records br
            JOIN books b ON br.book_id = b.id
            WHERE br.patron_id = ?1
            ORDER BY br.borrow_date DESC
            "#,
        )
        .bind(patron_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Records a borrow: inserts the open record and takes one copy off
    /// the shelf, atomically.
    ///
    /// The decrement is guarded by `available_copies > 0`; if no copy is
    /// left the whole transaction rolls back (the record is not kept) and
    /// `DbError::NoRowsAffected` is returned. The availability counter
    /// can therefore never go below zero.
    pub async fn record_borrow(
        &self,
        patron_id: &str,
        book_id: i64,
        borrow_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
    ) -> DbResult<()> {
        debug!(patron_id = %patron_id, book_id = %book_id, "Recording borrow");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO borrow_records (patron_id, book_id, borrow_date, due_date, return_date)
            VALUES (?1, ?2, ?3, ?4, NULL)
            "#,
        )
        .bind(patron_id)
        .bind(book_id)
        .bind(borrow_date)
        .bind(due_date)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies - 1
            WHERE id = ?1 AND available_copies > 0
            "#,
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DbError::no_rows(format!(
                "no available copy of book {book_id} to borrow"
            )));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Records a return: closes the open record and puts one copy back on
    /// the shelf, atomically.
    ///
    /// If the pair has no open record, nothing is mutated and
    /// `DbError::NoRowsAffected` is returned. The increment is guarded by
    /// `available_copies < total_copies`, so the counter can never exceed
    /// the owned total.
    pub async fn record_return(
        &self,
        patron_id: &str,
        book_id: i64,
        return_date: DateTime<Utc>,
    ) -> DbResult<()> {
        debug!(patron_id = %patron_id, book_id = %book_id, "Recording return");

        let mut tx = self.pool.begin().await?;

        let closed = sqlx::query(
            r#"
            UPDATE borrow_records
            SET return_date = ?3
            WHERE patron_id = ?1 AND book_id = ?2 AND return_date IS NULL
            "#,
        )
        .bind(patron_id)
        .bind(book_id)
        .bind(return_date)
        .execute(&mut *tx)
        .await?;

        if closed.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DbError::no_rows(format!(
                "no open loan of book {book_id} for patron {patron_id}"
            )));
        }

        let restocked = sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies + 1
            WHERE id = ?1 AND available_copies < total_copies
            "#,
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if restocked.rows_affected() == 0 {
            // An open record existed while the shelf was already full:
            // inconsistent state, refuse to make it worse.
            tx.rollback().await?;
            return Err(DbError::no_rows(format!(
                "availability increment rejected for book {book_id}"
            )));
        }

        tx.commit().await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;

    async fn seeded_db() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let book = db
            .books()
            .insert("Dune", "Frank Herbert", "9780441013593", 2)
            .await
            .unwrap();
        (db, book.id)
    }

    #[tokio::test]
    async fn test_borrow_decrements_and_opens_record() {
        let (db, book_id) = seeded_db().await;
        let loans = db.loans();
        let now = Utc::now();

        loans
            .record_borrow("123456", book_id, now, now + Duration::days(14))
            .await
            .unwrap();

        let book = db.books().get_by_id(book_id).await.unwrap().unwrap();
        assert_eq!(book.available_copies, 1);

        let open = loans.get_open("123456", book_id).await.unwrap().unwrap();
        assert_eq!(open.book_id, book_id);
        assert!(open.return_date.is_none());
        assert_eq!(loans.open_count("123456").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_borrow_rolls_back_when_no_copies() {
        let (db, book_id) = seeded_db().await;
        let loans = db.loans();
        let now = Utc::now();
        let due = now + Duration::days(14);

        loans.record_borrow("111111", book_id, now, due).await.unwrap();
        loans.record_borrow("222222", book_id, now, due).await.unwrap();

        // Shelf is empty: the third borrow must fail and leave no record
        let err = loans
            .record_borrow("333333", book_id, now, due)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NoRowsAffected(_)));

        let book = db.books().get_by_id(book_id).await.unwrap().unwrap();
        assert_eq!(book.available_copies, 0);
        assert!(loans.get_open("333333", book_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_return_closes_record_and_restocks() {
        let (db, book_id) = seeded_db().await;
        let loans = db.loans();
        let now = Utc::now();

        loans
            .record_borrow("123456", book_id, now, now + Duration::days(14))
            .await
            .unwrap();
        loans
            .record_return("123456", book_id, now + Duration::days(3))
            .await
            .unwrap();

        let book = db.books().get_by_id(book_id).await.unwrap().unwrap();
        assert_eq!(book.available_copies, 2);
        assert!(loans.get_open("123456", book_id).await.unwrap().is_none());

        // History keeps the closed record
        let history = loans.history("123456").await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].return_date.is_some());
    }

    #[tokio::test]
    async fn test_return_without_open_record_fails_cleanly() {
        let (db, book_id) = seeded_db().await;
        let loans = db.loans();

        let err = loans
            .record_return("123456", book_id, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NoRowsAffected(_)));

        // Nothing mutated
        let book = db.books().get_by_id(book_id).await.unwrap().unwrap();
        assert_eq!(book.available_copies, 2);
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let (db, book_id) = seeded_db().await;
        let other = db
            .books()
            .insert("Hyperion", "Dan Simmons", "9780553283686", 1)
            .await
            .unwrap();
        let loans = db.loans();
        let now = Utc::now();

        loans
            .record_borrow("123456", book_id, now - Duration::days(30), now - Duration::days(16))
            .await
            .unwrap();
        loans
            .record_return("123456", book_id, now - Duration::days(20))
            .await
            .unwrap();
        loans
            .record_borrow("123456", other.id, now, now + Duration::days(14))
            .await
            .unwrap();

        let history = loans.history("123456").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].title, "Hyperion");
        assert_eq!(history[1].title, "Dune");

        let open = loans.open_loans("123456").await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].title, "Hyperion");
    }
}
