//! # Late Fee Calculator
//!
//! Pure computation of the late-fee tariff. No clock access: "now" is
//! always a parameter, which keeps every fee deterministic and testable.
//!
//! ## The Tariff
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Late Fee Tariff                               │
//! │                                                                     │
//! │  days overdue:   1    2  ...   7    8    9   ...                   │
//! │  daily rate:   $0.50 $0.50   $0.50 $1.00 $1.00                     │
//! │                └───── first week ──┘└── thereafter ──┘             │
//! │                                                                     │
//! │  fee(d) = min( min(d,7) × $0.50 + max(d-7,0) × $1.00 , $15.00 )    │
//! │                                                                     │
//! │  fee(1)   = $0.50                                                   │
//! │  fee(7)   = $3.50                                                   │
//! │  fee(8)   = $4.50                                                   │
//! │  fee(100) = $15.00  (absolute cap)                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All arithmetic is in integer cents, so the tier sums and the cap are
//! exact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Daily rate for the first week overdue, in cents.
pub const FIRST_WEEK_RATE_CENTS: i64 = 50;

/// Daily rate after the first week, in cents.
pub const AFTER_WEEK_RATE_CENTS: i64 = 100;

/// Days charged at the first-week rate.
pub const FIRST_WEEK_DAYS: i64 = 7;

/// Absolute fee cap per loan, in cents ($15.00).
pub const MAX_FEE_CENTS: i64 = 1500;

// =============================================================================
// Result Type
// =============================================================================

/// Outcome class of a fee computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    /// No open loan exists for the queried (patron, book) pair.
    NoOpenLoan,
    /// The loan is not overdue; no fee.
    OnTime,
    /// The loan is overdue and a fee has accrued.
    Accrued,
}

/// A computed late fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateFee {
    /// Fee amount (zero unless `status` is `Accrued`).
    pub amount: Money,
    /// Whole days past the due date, clamped to >= 0. Keeps counting past
    /// the fee cap.
    pub days_overdue: i64,
    pub status: FeeStatus,
}

impl LateFee {
    /// The fee reported when no open loan could be found.
    pub const fn no_open_loan() -> Self {
        LateFee {
            amount: Money::zero(),
            days_overdue: 0,
            status: FeeStatus::NoOpenLoan,
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Computes the late fee for a loan due at `due` as of `now`.
///
/// `days_overdue` is the whole-day difference `now - due`; a loan
/// returned within the due day (or early) owes nothing. Fractional days
/// never round up to a charged day.
///
/// ## Example
/// ```rust
/// use chrono::{Duration, Utc};
/// use libris_core::fees::late_fee;
///
/// let due = Utc::now();
/// let fee = late_fee(due, due + Duration::days(8));
/// assert_eq!(fee.amount.cents(), 450); // $3.50 + $1.00
/// assert_eq!(fee.days_overdue, 8);
/// ```
pub fn late_fee(due: DateTime<Utc>, now: DateTime<Utc>) -> LateFee {
    let days_overdue = (now - due).num_days();

    if days_overdue <= 0 {
        return LateFee {
            amount: Money::zero(),
            days_overdue: 0,
            status: FeeStatus::OnTime,
        };
    }

    let first_week = days_overdue.min(FIRST_WEEK_DAYS) * FIRST_WEEK_RATE_CENTS;
    let after_week = (days_overdue - FIRST_WEEK_DAYS).max(0) * AFTER_WEEK_RATE_CENTS;
    let amount = Money::from_cents(first_week + after_week).min(Money::from_cents(MAX_FEE_CENTS));

    LateFee {
        amount,
        days_overdue,
        status: FeeStatus::Accrued,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
