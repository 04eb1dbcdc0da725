//! # Rule Table
//!
//! Explicit registry of the pricing rules a shop offers.
//!
//! Rules are registered by name at startup; product customization types
//! refer to a rule by that name.
//!
//! ```rust
//! use carpet_core::config::CarpetAreaConfig;
//! use carpet_core::registry::RuleTable;
//!
//! let table = RuleTable::with_defaults(CarpetAreaConfig::default()).unwrap();
//! let rule = table.require("carpet_area").unwrap();
//! assert_eq!(rule.options().len(), 4);
//! ```

use std::collections::BTreeMap;

use tracing::info;

use crate::config::CarpetAreaConfig;
use crate::error::{CoreError, CoreResult};
use crate::rule::{CarpetAreaRule, PricingRule};

/// Name → rule mapping.
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: BTreeMap<&'static str, Box<dyn PricingRule>>,
}

impl RuleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        RuleTable::default()
    }

    /// Creates a table holding the built-in rules.
    pub fn with_defaults(carpet_area: CarpetAreaConfig) -> CoreResult<Self> {
        let mut table = RuleTable::new();
        table.register(CarpetAreaRule::new(carpet_area)?)?;
        Ok(table)
    }

    /// Registers a rule under its own name.
    ///
    /// Fails if a rule with that name is already registered; the existing
    /// rule stays in place.
    pub fn register(&mut self, rule: impl PricingRule + 'static) -> CoreResult<()> {
        let name = rule.name();
        if self.rules.contains_key(name) {
            return Err(CoreError::DuplicateRule(name.to_string()));
        }

        info!(rule = name, "registered pricing rule");
        self.rules.insert(name, Box::new(rule));
        Ok(())
    }

    /// Looks up a rule by name.
    pub fn get(&self, name: &str) -> Option<&dyn PricingRule> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    /// Looks up a rule by name, failing with `UnknownRule`.
    pub fn require(&self, name: &str) -> CoreResult<&dyn PricingRule> {
        self.get(name)
            .ok_or_else(|| CoreError::UnknownRule(name.to_string()))
    }

    /// Looks up a rule by name as its concrete type.
    ///
    /// `None` if no rule has that name or it is of another type.
    pub fn get_as<R: PricingRule + 'static>(&self, name: &str) -> Option<&R> {
        self.get(name)?.as_any().downcast_ref::<R>()
    }

    /// The registered carpet area rule, for callers that need its
    /// breakdown (`quote`) or the legacy feedback adapter.
    pub fn carpet_area(&self) -> CoreResult<&CarpetAreaRule> {
        self.get_as(CarpetAreaRule::NAME)
            .ok_or_else(|| CoreError::UnknownRule(CarpetAreaRule::NAME.to_string()))
    }

    /// Registered rule names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RuleError, ValidationError};
    use crate::money::Money;
    use crate::pricing::{PriceBook, PriceLookup};
    use crate::types::{OptionDefinition, OptionSelection, VariantId};

    /// Charges a flat fee regardless of the selection.
    #[derive(Debug)]
    struct FlatFee;

    impl PricingRule for FlatFee {
        fn name(&self) -> &'static str {
            "flat_fee"
        }

        fn description(&self) -> &'static str {
            "Flat fee"
        }

        fn options(&self) -> Vec<OptionDefinition> {
            Vec::new()
        }

        fn check(&self, _selection: &OptionSelection) -> Result<(), ValidationError> {
            Ok(())
        }

        fn compute(
            &self,
            _selection: &OptionSelection,
            _variant: &VariantId,
            _prices: &dyn PriceLookup,
        ) -> Result<Money, RuleError> {
            Ok(Money::from_cents(500))
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[test]
    fn test_defaults_register_carpet_area() {
        let table = RuleTable::with_defaults(CarpetAreaConfig::default()).unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), ["carpet_area"]);
        assert!(table.get("carpet_area").is_some());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut table = RuleTable::with_defaults(CarpetAreaConfig::default()).unwrap();
        let err = table
            .register(CarpetAreaRule::new(CarpetAreaConfig::default()).unwrap())
            .unwrap_err();

        assert!(matches!(err, CoreError::DuplicateRule(name) if name == "carpet_area"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_custom_rules_sit_next_to_builtin() {
        let mut table = RuleTable::with_defaults(CarpetAreaConfig::default()).unwrap();
        table.register(FlatFee).unwrap();

        assert_eq!(table.names().collect::<Vec<_>>(), ["carpet_area", "flat_fee"]);

        let fee = table.require("flat_fee").unwrap();
        let price = fee
            .compute(
                &OptionSelection::new(),
                &VariantId::from("v1"),
                &PriceBook::new(),
            )
            .unwrap();
        assert_eq!(price, Money::from_cents(500));
    }

    #[test]
    fn test_typed_lookup_returns_registered_instance() {
        let config = CarpetAreaConfig::default().min_pricing_area(rust_decimal_macros::dec!(4));
        let mut table = RuleTable::with_defaults(config.clone()).unwrap();
        table.register(FlatFee).unwrap();

        let carpet = table.carpet_area().unwrap();
        assert_eq!(carpet.config(), &config);

        assert!(table.get_as::<FlatFee>("flat_fee").is_some());
        assert!(table.get_as::<FlatFee>("carpet_area").is_none());
        assert!(table.get_as::<CarpetAreaRule>("missing").is_none());
        assert!(matches!(
            RuleTable::new().carpet_area(),
            Err(CoreError::UnknownRule(_))
        ));
    }

    #[test]
    fn test_unknown_rule() {
        let table = RuleTable::new();
        assert!(table.is_empty());
        assert!(matches!(
            table.require("carpet_area"),
            Err(CoreError::UnknownRule(_))
        ));
    }
}
