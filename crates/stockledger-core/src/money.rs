//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats, stock valuation drifts:                                   │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    and the total depends on the order products are summed in.          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "5.50" is parsed straight into 550 cents, never through f64.        │
//! │    Sums of cents are exact, so any summation order gives the same      │
//! │    total valuation.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockledger_core::money::Money;
//!
//! let price = Money::parse("10.99").unwrap();
//! assert_eq!(price.cents(), 1099);
//!
//! let stock_value = price * 3;
//! assert_eq!(stock_value.to_string(), "32.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values are representable so validation can
///   report them instead of failing to parse
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating arithmetic**: totals clamp instead of panicking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Why a price text could not be read as money.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("value is empty")]
    Empty,

    #[error("'{0}' is not a decimal number")]
    NotANumber(String),

    #[error("at most two decimal places are allowed")]
    TooManyDecimals,

    #[error("value is too large")]
    Overflow,
}

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use stockledger_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a decimal amount such as `"10"`, `"10.5"` or `"10.50"`.
    ///
    /// ## Accepted Forms
    /// - optional leading `+` or `-`
    /// - ASCII digits, optionally followed by `.` and one or two digits
    /// - either side of the point may be empty (`".5"`, `"10."`) but not both
    ///
    /// Surrounding whitespace is ignored. Exponents, thousands separators
    /// and a comma as decimal point are rejected.
    ///
    /// ```rust
    /// use stockledger_core::money::Money;
    ///
    /// assert_eq!(Money::parse("5.5").unwrap().cents(), 550);
    /// assert_eq!(Money::parse("-2").unwrap().cents(), -200);
    /// assert!(Money::parse("1.999").is_err());
    /// assert!(Money::parse("abc").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Money, MoneyParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let not_a_number = || MoneyParseError::NotANumber(text.to_string());

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(not_a_number());
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(not_a_number());
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooManyDecimals);
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<i64>()
                .map_err(|_| MoneyParseError::Overflow)?
                .checked_mul(100)
                .ok_or(MoneyParseError::Overflow)?
        };

        // One fractional digit means tenths: "5.5" is 50 cents, not 5.
        let fraction_cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| not_a_number())? * 10,
            _ => fraction.parse::<i64>().map_err(|_| not_a_number())?,
        };

        let cents = whole_cents
            .checked_add(fraction_cents)
            .ok_or(MoneyParseError::Overflow)?;

        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a unit price by a stock quantity.
    ///
    /// ```rust
    /// use stockledger_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(550);
    /// assert_eq!(unit_price.multiply_quantity(20).cents(), 11000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Renders the amount with a display prefix, e.g. `"R$ 10.00"`.
    ///
    /// An empty symbol yields the bare decimal.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if symbol.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", symbol, self)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Two-decimal rendering without currency symbol: `10.99`, `-5.50`, `0.00`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, magnitude / 100, magnitude % 100)
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-7).to_string(), "-0.07");
    }

    #[test]
    fn test_format_with_symbol() {
        let price = Money::from_cents(1000);
        assert_eq!(price.format_with_symbol("R$"), "R$ 10.00");
        assert_eq!(price.format_with_symbol(""), "10.00");
    }

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.00").unwrap().cents(), 1000);
        assert_eq!(Money::parse("5.5").unwrap().cents(), 550);
        assert_eq!(Money::parse("5.05").unwrap().cents(), 505);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("10.").unwrap().cents(), 1000);
        assert_eq!(Money::parse("  3.25 ").unwrap().cents(), 325);
        assert_eq!(Money::parse("+1").unwrap().cents(), 100);
        assert_eq!(Money::parse("-0.01").unwrap().cents(), -1);
    }

    #[test]
    fn test_parse_rejected_forms() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("1.234"), Err(MoneyParseError::TooManyDecimals));
        assert!(matches!(Money::parse("abc"), Err(MoneyParseError::NotANumber(_))));
        assert!(matches!(Money::parse("."), Err(MoneyParseError::NotANumber(_))));
        assert!(matches!(Money::parse("-"), Err(MoneyParseError::NotANumber(_))));
        assert!(matches!(Money::parse("1,50"), Err(MoneyParseError::NotANumber(_))));
        assert!(matches!(Money::parse("1e3"), Err(MoneyParseError::NotANumber(_))));
        assert!(matches!(Money::parse("1.2.3"), Err(MoneyParseError::NotANumber(_))));
        assert_eq!(
            Money::parse("99999999999999999999"),
            Err(MoneyParseError::Overflow)
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc += b;
        assert_eq!(acc.cents(), 1500);
    }

    #[test]
    fn test_sum() {
        let values = [Money::from_cents(3000), Money::from_cents(11000)];
        let total: Money = values.iter().sum();
        assert_eq!(total.cents(), 14000);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let huge = Money::from_cents(i64::MAX);
        assert_eq!((huge + Money::from_cents(1)).cents(), i64::MAX);
        assert_eq!(huge.multiply_quantity(2).cents(), i64::MAX);
    }
}
