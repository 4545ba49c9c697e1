//! # Patron Reporter
//!
//! Aggregates a patron's open loans, accrued fees and full borrow
//! history into a status snapshot.
//!
//! ## Report Shape
//! ```text
//! report("123456")
//!      │
//!      ├── id malformed? → well-formed report, zero counts, empty
//!      │                   lists, status InvalidId (never an error)
//!      ▼
//!  open loans (joined with book data)
//!  per-loan late fee via the one canonical tariff, summed in cents
//!  full history, newest borrow first; open records carry an explicit
//!  "not yet returned" marker instead of a null
//!  status: AtBorrowingLimit when open count >= 5, else Active
//! ```
//!
//! The snapshot is regenerated on every request and never cached.

use chrono::Utc;
use tracing::debug;

use crate::error::ServiceResult;
use libris_core::{
    fees, HistoryEntry, Money, PatronReport, PatronStatus, MAX_OPEN_LOANS,
};
use libris_core::validation::validate_patron_id;
use libris_db::{Database, LoanRepository};

/// Marker shown in place of a return date while a loan is still open.
pub const NOT_YET_RETURNED: &str = "This book has not yet been returned";

/// The Patron Reporter service.
#[derive(Debug, Clone)]
pub struct ReportService {
    loans: LoanRepository,
}

impl ReportService {
    /// Creates a report service over the given storage handle.
    pub fn new(db: &Database) -> Self {
        ReportService { loans: db.loans() }
    }

    /// Builds the status report for one patron.
    ///
    /// A malformed patron id is an informational outcome, not a fault:
    /// the report comes back empty with [`PatronStatus::InvalidId`].
    pub async fn report(&self, patron_id: &str) -> ServiceResult<PatronReport> {
        if validate_patron_id(patron_id).is_err() {
            return Ok(PatronReport::invalid(patron_id));
        }

        let now = Utc::now();
        let current_loans = self.loans.open_loans(patron_id).await?;

        let total_late_fees: Money = current_loans
            .iter()
            .map(|loan| fees::late_fee(loan.due_date, now).amount)
            .sum();

        let history = self
            .loans
            .history(patron_id)
            .await?
            .into_iter()
            .map(|row| HistoryEntry {
                title: row.title,
                author: row.author,
                borrow_date: row.borrow_date,
                returned: match row.return_date {
                    Some(date) => date.format("%Y-%m-%d").to_string(),
                    None => NOT_YET_RETURNED.to_string(),
                },
            })
            .collect();

        let currently_borrowed = current_loans.len();
        let status = if currently_borrowed as i64 >= MAX_OPEN_LOANS {
            PatronStatus::AtBorrowingLimit
        } else {
            PatronStatus::Active
        };

        debug!(
            patron_id = %patron_id,
            open = currently_borrowed,
            fees = %total_late_fees,
            "Patron report built"
        );

        Ok(PatronReport {
            patron_id: patron_id.to_string(),
            currently_borrowed,
            total_late_fees,
            current_loans,
            history,
            status,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogService;
    use crate::loans::LoanService;
    use chrono::Duration;
    use libris_db::DbConfig;

    async fn setup() -> (Database, CatalogService, LoanService, ReportService) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (
            db.clone(),
            CatalogService::new(&db),
            LoanService::new(&db),
            ReportService::new(&db),
        )
    }

    #[tokio::test]
    async fn test_invalid_id_is_informational() {
        let (_db, _catalog, _loans, reports) = setup().await;

        for bad in ["", "12345", "abcdef", "12345678"] {
            let report = reports.report(bad).await.unwrap();
            assert_eq!(report.status, PatronStatus::InvalidId, "id {bad:?}");
            assert_eq!(report.currently_borrowed, 0);
            assert!(report.total_late_fees.is_zero());
            assert!(report.current_loans.is_empty());
            assert!(report.history.is_empty());
        }
    }

    #[tokio::test]
    async fn test_active_patron_with_open_and_closed_loans() {
        let (_db, catalog, loans, reports) = setup().await;
        let a = catalog.add_book("Dune", "Frank Herbert", "1111111111111", 1).await.unwrap().book;
        let b = catalog.add_book("Hyperion", "Dan Simmons", "2222222222222", 1).await.unwrap().book;

        loans.borrow("123456", a.id).await.unwrap();
        loans.return_book("123456", a.id).await.unwrap();
        loans.borrow("123456", b.id).await.unwrap();

        let report = reports.report("123456").await.unwrap();
        assert_eq!(report.status, PatronStatus::Active);
        assert_eq!(report.currently_borrowed, 1);
        assert_eq!(report.current_loans[0].title, "Hyperion");
        assert!(report.total_late_fees.is_zero());

        assert_eq!(report.history.len(), 2);
        let open_entry = report.history.iter().find(|h| h.title == "Hyperion").unwrap();
        assert_eq!(open_entry.returned, NOT_YET_RETURNED);
        let closed_entry = report.history.iter().find(|h| h.title == "Dune").unwrap();
        assert_ne!(closed_entry.returned, NOT_YET_RETURNED);
    }

    #[tokio::test]
    async fn test_overdue_fees_accumulate_per_loan() {
        let (db, catalog, _loans, reports) = setup().await;
        let a = catalog.add_book("A", "X", "1111111111111", 1).await.unwrap().book;
        let b = catalog.add_book("B", "Y", "2222222222222", 1).await.unwrap().book;

        // One loan 2 days overdue ($1.00), one 8 days overdue ($4.50)
        let now = Utc::now();
        db.loans()
            .record_borrow("123456", a.id, now - Duration::days(16), now - Duration::days(2))
            .await
            .unwrap();
        db.loans()
            .record_borrow("123456", b.id, now - Duration::days(22), now - Duration::days(8))
            .await
            .unwrap();

        let report = reports.report("123456").await.unwrap();
        assert_eq!(report.currently_borrowed, 2);
        assert_eq!(report.total_late_fees.cents(), 100 + 450);
    }

    #[tokio::test]
    async fn test_at_borrowing_limit_status() {
        let (_db, catalog, loans, reports) = setup().await;

        for i in 0..5 {
            let isbn = format!("111111111111{i}");
            let book = catalog.add_book("T", "A", &isbn, 1).await.unwrap().book;
            loans.borrow("123456", book.id).await.unwrap();
        }

        let report = reports.report("123456").await.unwrap();
        assert_eq!(report.status, PatronStatus::AtBorrowingLimit);
        assert_eq!(report.currently_borrowed, 5);
    }

    #[tokio::test]
    async fn test_report_serializes_for_front_end() {
        let (_db, _catalog, _loans, reports) = setup().await;

        let report = reports.report("bad-id").await.unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "invalid_id");
        assert_eq!(json["currently_borrowed"], 0);
    }
}
