//! # libris-service: Business-Logic Services for Libris
//!
//! Thin orchestration over [`libris_core`] (pure rules) and
//! [`libris_db`] (storage):
//!
//! - [`catalog::CatalogService`] - validates and inserts catalog entries
//! - [`loans::LoanService`] - borrow/return transitions and fee lookup
//! - [`search::SearchService`] - linear catalog filter by field
//! - [`report::ReportService`] - patron status snapshots
//!
//! Every service takes the storage handle explicitly at construction;
//! there is no global connection state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use libris_db::{Database, DbConfig};
//! use libris_service::{CatalogService, LoanService};
//!
//! let db = Database::new(DbConfig::new("./library.db")).await?;
//! let catalog = CatalogService::new(&db);
//! let loans = LoanService::new(&db);
//!
//! let book = catalog.add_book("Dune", "Frank Herbert", "9780441013593", 3).await?.book;
//! let receipt = loans.borrow("123456", book.id).await?;
//! println!("{receipt}"); // Successfully borrowed "Dune". Due date: ...
//! ```
//!
//! All operations are synchronous request/response per call; the only
//! cross-call state lives in the database.

pub mod catalog;
pub mod error;
pub mod loans;
pub mod report;
pub mod search;

pub use catalog::{CatalogReceipt, CatalogService};
pub use error::{ServiceError, ServiceResult};
pub use loans::{BorrowReceipt, LoanService, ReturnReceipt};
pub use report::{ReportService, NOT_YET_RETURNED};
pub use search::SearchService;
