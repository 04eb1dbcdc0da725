//! # Money Module
//!
//! Provides the `Money` type and `Currency` code used by every price in the
//! pricing core.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AREA PRICING NEEDS FRACTIONS                                           │
//! │                                                                         │
//! │  A 4,5 m × 3,25 m carpet at 19,90 €/m²:                                 │
//! │    area  = 14.625 m²                                                    │
//! │    price = 14.625 × 19.90 = 291.0375 €                                  │
//! │                                                                         │
//! │  In floating point this already drifts (0.1 + 0.2 ≠ 0.3).               │
//! │  Integer cents cannot hold the intermediate 291.0375 either.           │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 `Decimal`                                        │
//! │    Exact intermediate values, rounding only when displayed             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use carpet_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let unit_price = Money::new(dec!(19.90));
//! let price = unit_price * dec!(14.625);
//! assert_eq!(price.amount(), dec!(291.037500));
//! assert_eq!(price.to_string(), "291.04");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major currency units (euros, not cents).
///
/// ## Design Decisions
/// - **Decimal (signed)**: a price delta may be negative when the base price
///   exceeds the scaled unit price; that is a valid result, not an error
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **No currency inside**: the currency is a property of the price lookup,
///   prices are never mixed across currencies within one computation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(as = "String")] Decimal);

impl Money {
    /// Creates a Money value from a decimal amount in major units.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use carpet_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::from_cents(1990).amount(), dec!(19.90));
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the exact amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds to whole cents using Bankers Rounding (round half to even).
    ///
    /// ## Bankers Rounding
    /// ```text
    ///   0.125 → 0.12   (2 is even)
    ///   0.135 → 0.14   (4 is even)
    /// ```
    /// Over many line items this avoids a systematic upward bias.
    ///
    /// ## Example
    /// ```rust
    /// use carpet_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::new(dec!(0.125)).round_to_cents().amount(), dec!(0.12));
    /// assert_eq!(Money::new(dec!(0.135)).round_to_cents().amount(), dec!(0.14));
    /// ```
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount rounded to cents, without a currency symbol.
///
/// ## Note
/// This is for logs and the CLI. Localised formatting (comma decimals,
/// symbol placement) belongs to whatever renders the storefront.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_to_cents().0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Scaling by a quantity such as an area in m² or a perimeter in m.
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Currency
// =============================================================================

/// ISO 4217 currency code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Currency(String);

impl Currency {
    /// Creates a currency code, normalising to upper case.
    pub fn new(code: impl AsRef<str>) -> Self {
        Currency(code.as_ref().trim().to_ascii_uppercase())
    }

    /// Euro, the currency all carpet prices are quoted in.
    pub fn eur() -> Self {
        Currency("EUR".to_string())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(dec!(110)).to_string(), "110.00");
        assert_eq!(Money::new(dec!(4.5)).to_string(), "4.50");
        assert_eq!(Money::new(dec!(-5.5)).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10));
        let b = Money::new(dec!(2.5));

        assert_eq!((a + b).amount(), dec!(12.5));
        assert_eq!((a - b).amount(), dec!(7.5));
        assert_eq!((b - a).amount(), dec!(-7.5));
        assert_eq!((a * dec!(1.5)).amount(), dec!(15));
        assert_eq!((-a).amount(), dec!(-10));

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.amount(), dec!(15));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::new(dec!(-0.01));
        assert!(negative.is_negative());
        assert!(!negative.is_zero());
    }

    #[test]
    fn test_round_to_cents_is_bankers() {
        assert_eq!(Money::new(dec!(2.345)).round_to_cents().amount(), dec!(2.34));
        assert_eq!(Money::new(dec!(2.355)).round_to_cents().amount(), dec!(2.36));
        assert_eq!(Money::new(dec!(2.3451)).round_to_cents().amount(), dec!(2.35));
    }

    #[test]
    fn test_currency_is_normalised() {
        assert_eq!(Currency::new(" eur "), Currency::eur());
        assert_eq!(Currency::eur().to_string(), "EUR");
    }
}
