//! # Money Module
//!
//! Provides the `Money` type for late-fee amounts.
//!
//! ## Why Integer Money?
//! ```text
//! In floating point:
//!   0.1 + 0.2 = 0.30000000000000004   WRONG!
//!
//! OUR SOLUTION: integer cents
//!   a $4.50 fee is 450 cents; sums and caps are exact
//! ```
//!
//! ## Usage
//! ```rust
//! use libris_core::money::Money;
//!
//! let fee = Money::from_cents(450); // $4.50
//! assert_eq!(fee.to_string(), "$4.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: matches SQLite's integer affinity; fees themselves
///   are never negative
/// - **Single-field tuple struct**: zero-cost abstraction over i64
///
/// Every fee amount in the system flows through this type; only the
/// `Display` impl converts to dollars.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use libris_core::money::Money;
    ///
    /// let fee = Money::from_cents(1500); // $15.00
    /// assert_eq!(fee.cents(), 1500);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar part.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents part (0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns the smaller of two values. Used for fee caps.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }
}

/// Display shows money in the `$X.YY` format used in all user-facing
/// messages ("Late fee: $4.50").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Summing per-loan fees into a report total.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(50).to_string(), "$0.50");
        assert_eq!(Money::from_cents(350).to_string(), "$3.50");
        assert_eq!(Money::from_cents(1500).to_string(), "$15.00");
    }

    #[test]
    fn test_add_and_sum() {
        let total: Money = [Money::from_cents(50), Money::from_cents(450)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_cents(500));

        let mut acc = Money::zero();
        acc += Money::from_cents(150);
        assert_eq!(acc.cents(), 150);
    }

    #[test]
    fn test_min_cap() {
        assert_eq!(
            Money::from_cents(2000).min(Money::from_cents(1500)),
            Money::from_cents(1500)
        );
        assert_eq!(
            Money::from_cents(400).min(Money::from_cents(1500)),
            Money::from_cents(400)
        );
    }
}
