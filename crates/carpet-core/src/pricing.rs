//! # Price Lookup
//!
//! The seam between pricing rules and wherever unit prices live.
//!
//! ```text
//! CarpetAreaRule::compute
//!      │  amount_in(variant, EUR, raummass)
//!      ▼
//! dyn PriceLookup ──► PriceBook (in memory, this file)
//!                 └─► carpet-db snapshot (loaded from SQLite)
//! ```
//!
//! Rules never query a database directly: the caller loads a [`PriceBook`]
//! for the variant up front and hands it in.

use std::collections::HashMap;

use crate::error::LookupError;
use crate::money::{Currency, Money};
use crate::types::{CutType, VariantId};

/// Provides unit prices per variant, currency and price category.
pub trait PriceLookup {
    /// Returns the unit price of `variant` in `currency` for `category`.
    fn amount_in(
        &self,
        variant: &VariantId,
        currency: &Currency,
        category: CutType,
    ) -> Result<Money, LookupError>;
}

impl<T: PriceLookup + ?Sized> PriceLookup for &T {
    fn amount_in(
        &self,
        variant: &VariantId,
        currency: &Currency,
        category: CutType,
    ) -> Result<Money, LookupError> {
        (**self).amount_in(variant, currency, category)
    }
}

/// In-memory price table.
///
/// ## Example
/// ```rust
/// use carpet_core::money::{Currency, Money};
/// use carpet_core::pricing::{PriceBook, PriceLookup};
/// use carpet_core::types::{CutType, VariantId};
///
/// let variant = VariantId::from("berber-grey");
/// let mut book = PriceBook::new();
/// book.insert(variant.clone(), Currency::eur(), CutType::StandardCut, Money::from_cents(1990));
///
/// let price = book.amount_in(&variant, &Currency::eur(), CutType::StandardCut).unwrap();
/// assert_eq!(price, Money::from_cents(1990));
/// assert!(book.amount_in(&variant, &Currency::eur(), CutType::CustomCut).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    prices: HashMap<(VariantId, Currency, CutType), Money>,
}

impl PriceBook {
    pub fn new() -> Self {
        PriceBook::default()
    }

    /// Adds or replaces a price, returning the previous one.
    pub fn insert(
        &mut self,
        variant: VariantId,
        currency: Currency,
        category: CutType,
        amount: Money,
    ) -> Option<Money> {
        self.prices.insert((variant, currency, category), amount)
    }

    /// Builder-style insert.
    pub fn with_price(
        mut self,
        variant: impl Into<VariantId>,
        currency: Currency,
        category: CutType,
        amount: Money,
    ) -> Self {
        self.insert(variant.into(), currency, category, amount);
        self
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceLookup for PriceBook {
    fn amount_in(
        &self,
        variant: &VariantId,
        currency: &Currency,
        category: CutType,
    ) -> Result<Money, LookupError> {
        self.prices
            .get(&(variant.clone(), currency.clone(), category))
            .copied()
            .ok_or_else(|| LookupError::NotFound {
                variant: variant.to_string(),
                currency: currency.to_string(),
                category: category.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lookup_is_keyed_by_currency() {
        let book = PriceBook::new()
            .with_price("v1", Currency::eur(), CutType::CustomCut, Money::new(dec!(12)))
            .with_price("v1", Currency::new("CHF"), CutType::CustomCut, Money::new(dec!(13)));

        assert_eq!(book.len(), 2);
        assert_eq!(
            book.amount_in(&"v1".into(), &Currency::new("chf"), CutType::CustomCut),
            Ok(Money::new(dec!(13)))
        );
    }

    #[test]
    fn test_missing_price_is_not_found() {
        let book = PriceBook::new();
        assert!(book.is_empty());

        let err = book
            .amount_in(&"v1".into(), &Currency::eur(), CutType::StandardCut)
            .unwrap_err();
        assert_eq!(
            err,
            LookupError::NotFound {
                variant: "v1".to_string(),
                currency: "EUR".to_string(),
                category: "glattschnitt".to_string(),
            }
        );
    }

    #[test]
    fn test_insert_replaces() {
        let mut book = PriceBook::new();
        let v = VariantId::from("v1");
        assert!(book
            .insert(v.clone(), Currency::eur(), CutType::StandardCut, Money::new(dec!(1)))
            .is_none());
        assert_eq!(
            book.insert(v, Currency::eur(), CutType::StandardCut, Money::new(dec!(2))),
            Some(Money::new(dec!(1)))
        );
    }
}
