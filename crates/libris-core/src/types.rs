//! # Domain Types
//!
//! Core domain types used throughout Libris.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────┐  │
//! │  │     Book        │   │   BorrowRecord   │   │  PatronReport   │  │
//! │  │  ─────────────  │   │  ──────────────  │   │  (derived, not  │  │
//! │  │  id             │   │  patron_id       │   │   stored)       │  │
//! │  │  isbn (unique)  │   │  book_id         │   │  open loans     │  │
//! │  │  title/author   │   │  borrow/due date │   │  fees, history  │  │
//! │  │  copies         │   │  return_date?    │   │  status         │  │
//! │  └─────────────────┘   └──────────────────┘   └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A patron is identified solely by a 6-digit numeric id; there is no
//! separate patron entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
///
/// `available_copies` is mutated on borrow (-1) and return (+1) and always
/// stays within `0..=total_copies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    /// Unique identifier (autoincrement rowid).
    pub id: i64,

    /// Title, stored trimmed (max 200 chars).
    pub title: String,

    /// Author, stored trimmed (max 100 chars).
    pub author: String,

    /// ISBN-13 without dashes - business identifier, unique.
    pub isbn: String,

    /// Number of copies the library owns (positive).
    pub total_copies: i64,

    /// Copies currently on the shelf.
    pub available_copies: i64,
}

// =============================================================================
// Borrow Record
// =============================================================================

/// One borrow of one book by one patron.
///
/// Created on borrow, closed (return_date set) on return, never deleted.
/// An **open** record is one with `return_date = None`; at most one open
/// record exists per (patron_id, book_id) pair at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BorrowRecord {
    /// Unique identifier (autoincrement rowid).
    pub id: i64,

    /// 6-digit library card id.
    pub patron_id: String,

    /// The borrowed book.
    pub book_id: i64,

    /// When the book was borrowed.
    pub borrow_date: DateTime<Utc>,

    /// borrow_date + the loan period (14 days).
    pub due_date: DateTime<Utc>,

    /// When the book came back; `None` while the loan is open.
    pub return_date: Option<DateTime<Utc>>,
}

// =============================================================================
// Loan views (rows joined with book data)
// =============================================================================

/// An open loan joined with the book it refers to, as shown in a patron
/// report's current-loans list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OpenLoan {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

/// One row of a patron's full borrow history (open and closed loans),
/// joined with book title/author.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LoanHistoryRecord {
    pub title: String,
    pub author: String,
    pub borrow_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

// =============================================================================
// Patron Report
// =============================================================================

/// Patron account standing, as shown in the status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatronStatus {
    /// Patron can borrow more books.
    Active,
    /// Patron holds the maximum number of open loans.
    AtBorrowingLimit,
    /// The supplied patron id is not a 6-digit number. The report is
    /// still well-formed (zero counts, empty lists) - this is
    /// informational, not a fault.
    InvalidId,
}

/// Display renders the labels a front end prints on the report.
impl fmt::Display for PatronStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatronStatus::Active => "Active",
            PatronStatus::AtBorrowingLimit => "At borrowing limit",
            PatronStatus::InvalidId => "Invalid ID",
        };
        f.write_str(label)
    }
}

/// One line of a patron's history as presented in the report.
///
/// `returned` is always a display string; an open loan carries an
/// explicit "not yet returned" marker rather than a null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub title: String,
    pub author: String,
    pub borrow_date: DateTime<Utc>,
    pub returned: String,
}

/// Status snapshot for one patron.
///
/// Derived on every request from the stored loans; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronReport {
    pub patron_id: String,
    /// Number of currently open loans.
    pub currently_borrowed: usize,
    /// Sum of late fees over open loans, in exact cents.
    pub total_late_fees: Money,
    pub current_loans: Vec<OpenLoan>,
    /// Full borrow history, newest borrow first.
    pub history: Vec<HistoryEntry>,
    pub status: PatronStatus,
}

impl PatronReport {
    /// An empty report for a malformed patron id.
    pub fn invalid(patron_id: &str) -> Self {
        PatronReport {
            patron_id: patron_id.to_string(),
            currently_borrowed: 0,
            total_late_fees: Money::zero(),
            current_loans: Vec::new(),
            history: Vec::new(),
            status: PatronStatus::InvalidId,
        }
    }
}

// =============================================================================
// Search
// =============================================================================

/// Catalog field a search term is matched against.
///
/// Title and author use case-insensitive substring matching; ISBN uses
/// case-insensitive exact equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Author,
    Isbn,
}

/// The given string names no searchable field. Searches treat this as
/// "no results", not as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownField;

impl FromStr for SearchField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            "isbn" => Ok(SearchField::Isbn),
            _ => Err(UnknownField),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_field_parsing() {
        assert_eq!("title".parse::<SearchField>(), Ok(SearchField::Title));
        assert_eq!("author".parse::<SearchField>(), Ok(SearchField::Author));
        assert_eq!("isbn".parse::<SearchField>(), Ok(SearchField::Isbn));
        assert!("edition".parse::<SearchField>().is_err());
        assert!("Title".parse::<SearchField>().is_err());
    }

    #[test]
    fn test_invalid_report_is_empty() {
        let report = PatronReport::invalid("12ab");
        assert_eq!(report.patron_id, "12ab");
        assert_eq!(report.currently_borrowed, 0);
        assert!(report.total_late_fees.is_zero());
        assert!(report.current_loans.is_empty());
        assert!(report.history.is_empty());
        assert_eq!(report.status, PatronStatus::InvalidId);
        assert_eq!(report.status.to_string(), "Invalid ID");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(PatronStatus::Active.to_string(), "Active");
        assert_eq!(
            PatronStatus::AtBorrowingLimit.to_string(),
            "At borrowing limit"
        );
    }
}
