//! Currency values for prices, evaluations and payoffs.
//!
//! ## Overview
//!
//! Every monetary amount in the experiment is a [`Currency`]: a thin wrapper
//! around `rust_decimal::Decimal`. Nothing is ever stored as a float, so a
//! bid of `7.10` compares equal to every other bid of `7.10` and ties are
//! detected exactly.
//!
//! ## Precision
//!
//! Sessions configure how many fractional digits points carry
//! (`points_decimal_places`, 2 by default). Values are rounded to that
//! precision when they enter the system (evaluation draws, bid prices,
//! computed payoffs), not when they are displayed.
//!
//! ## Examples
//!
//! ```
//! use volauction::types::currency::{to_price, Currency};
//!
//! let price = to_price("7.5").unwrap();
//! assert_eq!(price.format(2), "7.50");
//!
//! // Prices are never negative
//! assert_eq!(to_price("-1"), None);
//!
//! // Payoffs may be
//! let loss = Currency::from_int(4) - Currency::from_int(6);
//! assert!(loss.is_negative());
//! ```

use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fractional digits used when a session does not configure its own.
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Largest precision accepted from configuration.
pub const MAX_DECIMAL_PLACES: u32 = 8;

/// A monetary amount in experimental points.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Currency(Decimal);

impl Currency {
    /// Zero points
    pub const ZERO: Currency = Currency(Decimal::ZERO);

    /// Wrap a decimal value as-is
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Whole number of points
    pub fn from_int(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    /// Build a value from an integer count of the smallest unit.
    ///
    /// ```
    /// use volauction::types::currency::Currency;
    ///
    /// assert_eq!(Currency::from_minor_units(750, 2).format(2), "7.50");
    /// ```
    pub fn from_minor_units(units: i64, decimal_places: u32) -> Self {
        Self(Decimal::new(units, decimal_places))
    }

    /// Count of the smallest unit at `decimal_places` precision.
    ///
    /// Returns `None` if the value does not fit in an `i64`.
    pub fn to_minor_units(self, decimal_places: u32) -> Option<i64> {
        let scale = Decimal::from(10i64.checked_pow(decimal_places)?);
        self.0.checked_mul(scale)?.round().to_i64()
    }

    /// The underlying decimal
    #[inline]
    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Round to the given number of fractional digits
    pub fn round_dp(self, decimal_places: u32) -> Self {
        Self(self.0.round_dp(decimal_places))
    }

    /// True for amounts strictly below zero
    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiply by a plain decimal factor (conversion rates, fees)
    pub fn checked_mul_decimal(self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    /// Render with exactly `decimal_places` fractional digits
    pub fn format(self, decimal_places: u32) -> String {
        format!("{:.*}", decimal_places as usize, self.0)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_DECIMAL_PLACES))
    }
}

impl FromStr for Currency {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl From<Decimal> for Currency {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Currency {
    type Output = Currency;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Currency {
    type Output = Currency;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Currency {
    type Output = Currency;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

// ============================================================================
// Parsing helpers
// ============================================================================

/// Parse a bid price.
///
/// # Returns
///
/// * `Some(Currency)` - a non-negative amount
/// * `None` - if parsing fails or the amount is negative
///
/// ```
/// use volauction::types::currency::to_price;
///
/// assert!(to_price("0").is_some());
/// assert!(to_price("abc").is_none());
/// ```
pub fn to_price(s: &str) -> Option<Currency> {
    let value = Currency::from_str(s).ok()?;
    if value.is_negative() {
        return None;
    }
    Some(value)
}

// ============================================================================
// Unit Tests
// ============================================================================
