//! # libris-db: Storage Gateway for Libris
//!
//! This crate provides database access for the library-management system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (books, borrow records)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use libris_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let db = Database::new(DbConfig::new("path/to/library.db")).await?;
//!
//! // Use repositories
//! let book = db.books().get_by_isbn("9781234567890").await?;
//! let open = db.loans().open_count("123456").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::book::BookRepository;
pub use repository::loan::LoanRepository;
