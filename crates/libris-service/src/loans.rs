//! # Loan Manager
//!
//! Validates and executes the borrow/return state transitions.
//!
//! ## Borrow Flow
//! ```text
//! borrow(patron_id, book_id)
//!      │
//!      ├── patron id not 6 digits?       → Validation error
//!      ├── book missing?                 → BookNotFound
//!      ├── available_copies == 0?        → BookUnavailable
//!      ├── open loans >= 5?              → BorrowLimitReached
//!      │
//!      ▼
//!  one transaction: INSERT record (due = now + 14 days)
//!                   + guarded availability decrement
//! ```
//!
//! ## Return Flow
//! ```text
//! return_book(patron_id, book_id)
//!      │
//!      ├── patron id not 6 digits?       → Validation error
//!      ├── book missing?                 → BookNotFound
//!      ├── no open record for the pair?  → NotBorrowed
//!      │
//!      ├── late fee computed from the stored due date,
//!      │   BEFORE the return is recorded
//!      ▼
//!  one transaction: close record + guarded availability increment
//! ```

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use libris_core::validation::validate_patron_id;
use libris_core::{fees, LateFee, LOAN_PERIOD_DAYS, MAX_OPEN_LOANS};
use libris_db::{BookRepository, Database, DbError, LoanRepository};

/// Confirmation of a successful borrow.
#[derive(Debug, Clone)]
pub struct BorrowReceipt {
    pub title: String,
    pub due_date: DateTime<Utc>,
}

impl fmt::Display for BorrowReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Successfully borrowed \"{}\". Due date: {}.",
            self.title,
            self.due_date.format("%Y-%m-%d")
        )
    }
}

/// Confirmation of a successful return, including the late fee owed.
#[derive(Debug, Clone)]
pub struct ReturnReceipt {
    pub title: String,
    pub fee: LateFee,
}

impl fmt::Display for ReturnReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book \"{}\" has been returned successfully. Late fee: {}",
            self.title, self.fee.amount
        )
    }
}

/// The Loan Manager service.
#[derive(Debug, Clone)]
pub struct LoanService {
    books: BookRepository,
    loans: LoanRepository,
}

impl LoanService {
    /// Creates a loan service over the given storage handle.
    pub fn new(db: &Database) -> Self {
        LoanService {
            books: db.books(),
            loans: db.loans(),
        }
    }

    /// Borrows a book for a patron.
    ///
    /// The per-patron limit is inclusive: a patron holding
    /// [`MAX_OPEN_LOANS`] open loans is refused. Record insertion and the
    /// availability decrement happen in one transaction, so availability
    /// can never go below zero and no orphan record can persist.
    pub async fn borrow(&self, patron_id: &str, book_id: i64) -> ServiceResult<BorrowReceipt> {
        validate_patron_id(patron_id)?;

        let book = self
            .books
            .get_by_id(book_id)
            .await?
            .ok_or(ServiceError::BookNotFound)?;

        if book.available_copies <= 0 {
            return Err(ServiceError::BookUnavailable);
        }

        if self.loans.open_count(patron_id).await? >= MAX_OPEN_LOANS {
            return Err(ServiceError::BorrowLimitReached {
                max: MAX_OPEN_LOANS,
            });
        }

        let now = Utc::now();
        let due_date = now + Duration::days(LOAN_PERIOD_DAYS);

        self.loans
            .record_borrow(patron_id, book_id, now, due_date)
            .await
            .map_err(|e| match e {
                // The guarded decrement found no copy after all
                DbError::NoRowsAffected(_) => ServiceError::BookUnavailable,
                other => ServiceError::Db(other),
            })?;

        info!(patron_id = %patron_id, book_id, due = %due_date.format("%Y-%m-%d"), "Book borrowed");
        Ok(BorrowReceipt {
            title: book.title,
            due_date,
        })
    }

    /// Returns a borrowed book.
    ///
    /// The late fee is computed from the stored due date before the
    /// return is recorded, then the record is closed and availability
    /// incremented in one transaction. If closing fails, nothing is
    /// mutated.
    pub async fn return_book(&self, patron_id: &str, book_id: i64) -> ServiceResult<ReturnReceipt> {
        validate_patron_id(patron_id)?;

        let book = self
            .books
            .get_by_id(book_id)
            .await?
            .ok_or(ServiceError::BookNotFound)?;

        let record = self
            .loans
            .get_open(patron_id, book_id)
            .await?
            .ok_or(ServiceError::NotBorrowed)?;

        let now = Utc::now();
        let fee = fees::late_fee(record.due_date, now);

        self.loans
            .record_return(patron_id, book_id, now)
            .await
            .map_err(|e| match e {
                DbError::NoRowsAffected(_) => ServiceError::NotBorrowed,
                other => ServiceError::Db(other),
            })?;

        info!(
            patron_id = %patron_id,
            book_id,
            fee = %fee.amount,
            days_overdue = fee.days_overdue,
            "Book returned"
        );
        Ok(ReturnReceipt {
            title: book.title,
            fee,
        })
    }

    /// Computes the late fee a patron currently owes on one book.
    ///
    /// Pure lookup: nothing is mutated. A pair with no open loan yields
    /// the zero fee with [`libris_core::FeeStatus::NoOpenLoan`].
    pub async fn late_fee(&self, patron_id: &str, book_id: i64) -> ServiceResult<LateFee> {
        validate_patron_id(patron_id)?;

        match self.loans.get_open(patron_id, book_id).await? {
            Some(record) => Ok(fees::late_fee(record.due_date, Utc::now())),
            None => Ok(LateFee::no_open_loan()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
