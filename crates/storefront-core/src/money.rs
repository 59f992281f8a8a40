//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    19.99 * 1.1 = 21.989000000000001  ❌ WRONG!                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents + round_half_up(1999 * 10%) = 2199 cents ("21.99")       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Money crosses the API boundary as a decimal string with exactly two
//! fractional digits (`"10.00"`). Incoming values may be strings or JSON
//! numbers; both go through [`Money::from_decimal_str`] so that a price
//! with three decimals is rejected instead of silently rounded.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_decimal_str("10.00").unwrap();
//! assert_eq!(price.cents(), 1000);
//! assert_eq!(price.to_string(), "10.00");
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use thiserror::Error;

use crate::types::TaxRate;

/// Number of fractional digits carried by every price.
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum number of digits (integer + fractional) a price may have.
///
/// Six digits with two decimals caps prices at 9999.99.
pub const MAX_DIGITS: u32 = 6;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic never has to think about underflow
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Stored as INTEGER** in SQLite through `sqlx(transparent)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents 10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Parses a decimal string such as `"10"`, `"10.5"` or `"10.50"`.
    ///
    /// ## Rules
    /// - optional leading `-`, then digits, optionally `.` and digits
    /// - at most [`DECIMAL_PLACES`] fractional digits
    /// - at most [`MAX_DIGITS`] digits in total (leading zeros ignored)
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::{Money, ParseMoneyError};
    ///
    /// assert_eq!(Money::from_decimal_str("0.01").unwrap().cents(), 1);
    /// assert_eq!(Money::from_decimal_str("12.5").unwrap().cents(), 1250);
    /// assert_eq!(
    ///     Money::from_decimal_str("1.999"),
    ///     Err(ParseMoneyError::TooManyDecimals { max: 2 })
    /// );
    /// ```
    pub fn from_decimal_str(input: &str) -> Result<Money, ParseMoneyError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseMoneyError::Empty);
        }

        let (negative, unsigned) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(ParseMoneyError::InvalidFormat);
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(ParseMoneyError::InvalidFormat);
        }
        if unsigned.ends_with('.') && fraction.is_empty() {
            return Err(ParseMoneyError::InvalidFormat);
        }

        // Counted as written: "10.500" has three decimals
        if fraction.len() > DECIMAL_PLACES as usize {
            return Err(ParseMoneyError::TooManyDecimals {
                max: DECIMAL_PLACES,
            });
        }

        let whole = whole.trim_start_matches('0');
        if whole.len() > (MAX_DIGITS - DECIMAL_PLACES) as usize {
            return Err(ParseMoneyError::TooManyDigits { max: MAX_DIGITS });
        }

        let whole_cents: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| ParseMoneyError::InvalidFormat)? * 100
        };

        let fraction_cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| ParseMoneyError::InvalidFormat)? * 10,
            _ => fraction.parse::<i64>().map_err(|_| ParseMoneyError::InvalidFormat)?,
        };

        let cents = whole_cents + fraction_cents;
        Ok(Money(if negative { -cents } else { cents }))
    }

    /// Calculates tax, rounding half up to the nearest cent.
    ///
    /// ## Implementation
    /// We use integer math: `(amount * rate + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::TaxRate;
    ///
    /// let price = Money::from_cents(1005); // 10.05
    /// let rate = TaxRate::from_bps(1000);  // 10%
    ///
    /// // 10.05 × 10% = 1.005 → rounds up to 1.01
    /// assert_eq!(price.calculate_tax(rate).cents(), 101);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // Use i128 to prevent overflow on large amounts
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Returns the amount with tax added.
    ///
    /// ```text
    /// unit_price ──► calculate_tax(rate) ──► unit_price + tax
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::TaxRate;
    ///
    /// let price = Money::from_cents(1000);
    /// assert_eq!(price.with_tax(TaxRate::from_bps(1000)).to_string(), "11.00");
    /// ```
    #[inline]
    pub fn with_tax(&self, rate: TaxRate) -> Money {
        *self + self.calculate_tax(rate)
    }
}

// =============================================================================
// Parse Errors
// =============================================================================

/// Reasons a decimal string cannot become [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    #[error("a valid number is required")]
    Empty,

    #[error("a valid number is required")]
    InvalidFormat,

    #[error("ensure that there are no more than {max} decimal places")]
    TooManyDecimals { max: u32 },

    #[error("ensure that there are no more than {max} digits in total")]
    TooManyDigits { max: u32 },
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as a plain decimal with two fractional digits, e.g. `10.99`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
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
        Money(self.0 + other.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::from_decimal_str(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Money::from_decimal_str(&v.to_string()).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Money::from_decimal_str(&v.to_string()).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        // Display for f64 prints the shortest round-trip form: 10.1 → "10.1"
        Money::from_decimal_str(&v.to_string()).map_err(E::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
