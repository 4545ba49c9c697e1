//! # Repository Module
//!
//! Database repository implementations for Libris.
//!
//! ## Repository Pattern
//! ```text
//! Service
//!    │  db.books().get_by_isbn("9781234567890")
//!    ▼
//! BookRepository
//!    │  SQL query
//!    ▼
//! SQLite Database
//! ```
//!
//! Benefits: SQL is isolated in one place, services stay free of query
//! text, and repositories can be exercised directly against an in-memory
//! database in tests.
//!
//! ## Available Repositories
//!
//! - [`book::BookRepository`] - Catalog rows and the availability counter
//! - [`loan::LoanRepository`] - Borrow records and the transactional
//!   borrow/return sequences

pub mod book;
pub mod loan;
