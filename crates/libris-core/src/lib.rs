//! # libris-core: Pure Business Logic for Libris
//!
//! This crate is the heart of the library-management system. It contains
//! all business rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Libris Architecture                            │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                 libris-service (Services)                     │ │
//! │  │   add_book ──► borrow ──► return_book ──► search ──► report   │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │              ★ libris-core (THIS CRATE) ★                     │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐      │ │
//! │  │   │  types  │  │  money  │  │  fees   │  │ validation │      │ │
//! │  │   │  Book   │  │  Money  │  │ LateFee │  │   rules    │      │ │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └────────────┘      │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                       │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                 libris-db (Storage Gateway)                   │ │
//! │  │            SQLite queries, migrations, repositories           │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output; "now" is always a
//!    parameter, never read from the clock here
//! 2. **Integer Money**: fee amounts are cents (i64) to avoid float errors
//! 3. **Explicit Errors**: all errors are typed, never strings or panics

pub mod error;
pub mod fees;
pub mod money;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use fees::{late_fee, FeeStatus, LateFee};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of a loan, in days. Due date = borrow date + this.
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Maximum number of simultaneously open loans per patron.
///
/// Inclusive boundary: a patron holding this many open loans is refused
/// the next borrow.
pub const MAX_OPEN_LOANS: i64 = 5;

/// Required length of a patron id (all ASCII digits).
pub const PATRON_ID_LEN: usize = 6;

/// Required length of an ISBN (all ASCII digits, ISBN-13 without dashes).
pub const ISBN_LEN: usize = 13;
