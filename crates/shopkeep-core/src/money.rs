//! # Money Module
//!
//! Provides the `Money` type used for every price, amount and aggregate in
//! the ledger.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RECONCILIATION MUST BE REPEATABLE                                      │
//! │                                                                         │
//! │  With floating point:                                                   │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    Σ in a different order can give a different last digit              │
//! │                                                                         │
//! │  With integer minor units (hundredths):                                 │
//! │    10 + 20 = 30, in any order, after any reload                         │
//! │                                                                         │
//! │  Totals recomputed from a reloaded snapshot are bit-identical to the   │
//! │  totals computed before it was written.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopkeep_core::money::Money;
//!
//! let cost = Money::parse("100").unwrap();      // 100.00
//! let line = cost.multiply_quantity(3);         // 300.00
//! assert_eq!(line.minor_units(), 30_000);
//! assert_eq!(line.to_string(), "300.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Number of minor units in one major unit.
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in minor units (hundredths of the shop currency).
///
/// ## Design Decisions
/// - **i64 (signed)**: profit and available cash are routinely negative
/// - **Single field tuple struct**: serializes as a bare integer, so the
///   persisted records stay plain JSON numbers
/// - **Saturating arithmetic**: results clamp at the i64 bounds instead of
///   panicking or wrapping. Form limits (`validation::MAX_AMOUNT`,
///   `validation::MAX_STOCK`) keep real ledgers far below them.
///
/// ## Where Money is Used
/// ```text
/// Product.costPrice ─────┬──► totalInvestment, remainingStockValue,
///                        │    costOfSoldItems
/// Product.sellingPrice ──┤
/// Product.discountedPrice┴──► Sale.price (snapshot) ──► totalRevenue
///
/// Expense.amount ───────────► totalExpenses ──► availableCash
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use shopkeep_core::money::Money;
    ///
    /// let price = Money::from_minor(15_050); // 150.50
    /// assert_eq!(price.major(), 150);
    /// assert_eq!(price.minor_part(), 50);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Parses decimal text as typed into a form field.
    ///
    /// ## Accepted
    /// - optional sign, digits, optional `.` with one or two digits
    /// - surrounding whitespace is ignored
    ///
    /// Returns `None` for empty text, stray characters, more than two
    /// fractional digits, or values that overflow.
    ///
    /// ```rust
    /// use shopkeep_core::money::Money;
    ///
    /// assert_eq!(Money::parse("150").unwrap().minor_units(), 15_000);
    /// assert_eq!(Money::parse(" 9.5 ").unwrap().minor_units(), 950);
    /// assert_eq!(Money::parse("-2.25").unwrap().minor_units(), -225);
    /// assert!(Money::parse("").is_none());
    /// assert!(Money::parse("12abc").is_none());
    /// assert!(Money::parse("1.234").is_none());
    /// ```
    pub fn parse(input: &str) -> Option<Money> {
        let text = input.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };

        let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if !digits_only(whole) {
            return None;
        }

        let minor_fraction = match fraction {
            None => 0,
            Some(f) if f.is_empty() || f.len() > 2 || !digits_only(f) => return None,
            Some(f) if f.len() == 1 => f.parse::<i64>().ok()? * 10,
            Some(f) => f.parse::<i64>().ok()?,
        };

        if whole.is_empty() && fraction.is_none() {
            return None;
        }

        let major = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().ok()?
        };

        let magnitude = major
            .checked_mul(MINOR_PER_MAJOR)?
            .checked_add(minor_fraction)?;

        Some(Money(if negative { -magnitude } else { magnitude }))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the whole major-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit amount by a quantity of units.
    ///
    /// ```rust
    /// use shopkeep_core::money::Money;
    ///
    /// let unit = Money::from_major(150);
    /// assert_eq!(unit.multiply_quantity(3), Money::from_major(450));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `major.minor` without a currency symbol.
///
/// Currency placement is a presentation concern handled by the backend
/// configuration (`ConfigState::format_currency`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

/// Multiplication by a unit count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing an iterator of Money (used by every aggregate).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
