//! # Pricing Rules
//!
//! A pricing rule turns a customer's option selection into a price delta
//! relative to the variant's base price.
//!
//! ## Carpet Area Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Selection: Width "4,5"  Height "3"  Type "raummass"  Overedging "yes"  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  check() ── required? ── cut type? ── width? ── height? ── overedging?  │
//! │       │            any failure → RuleError::Invalid(reason)             │
//! │       ▼                                                                 │
//! │  area        = 4.5 × 3                    = 13.5 m²                     │
//! │  priced_area = max(area, min_pricing_area)                              │
//! │  unit_price  = price(variant, EUR, raummass)                            │
//! │  base_price  = price(variant, EUR, glattschnitt)                        │
//! │  overedging  = 2 × (width + height) × multiplier                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total = priced_area × unit_price − base_price + overedging             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is not clamped: it is negative whenever the base price exceeds
//! the scaled unit price.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::any::Any;
use std::fmt;
use tracing::{debug, warn};

use crate::config::CarpetAreaConfig;
use crate::error::{ConfigError, LookupError, RuleError, ValidationError};
use crate::money::{Currency, Money};
use crate::pricing::PriceLookup;
use crate::types::{CutType, OptionDefinition, OptionName, OptionSelection, Quote, VariantId};
use crate::validation::{
    parse_decimal, validate_range, validate_required, validate_standard_width,
    ValidationResult,
};

/// Message written into the Type option when a selection cannot be priced.
///
/// Shown verbatim in the storefront cart, hence German.
pub const INVALID_SELECTION_MESSAGE: &str =
    "Leider gab es einen Fehler bei der Eingabe. Bitte wenden Sie sich an unseren Kundenservice.";

// =============================================================================
// Rule Interface
// =============================================================================

/// A named pricing rule that can be registered in a
/// [`RuleTable`](crate::registry::RuleTable).
pub trait PricingRule: fmt::Debug + Send + Sync {
    /// Unique key of the rule in the rule table.
    fn name(&self) -> &'static str;

    /// Human-readable description for the admin.
    fn description(&self) -> &'static str;

    /// Options the storefront has to collect for this rule.
    fn options(&self) -> Vec<OptionDefinition>;

    /// Checks a selection, returning the first reason it is rejected.
    fn check(&self, selection: &OptionSelection) -> Result<(), ValidationError>;

    /// Whether the selection can be priced.
    fn validate(&self, selection: &OptionSelection) -> bool {
        self.check(selection).is_ok()
    }

    /// Computes the price delta for a selection.
    ///
    /// Validation is repeated here, so `compute` is safe to call without a
    /// prior `validate`.
    fn compute(
        &self,
        selection: &OptionSelection,
        variant: &VariantId,
        prices: &dyn PriceLookup,
    ) -> Result<Money, RuleError>;

    /// The rule as `Any`, for typed lookups in the rule table.
    fn as_any(&self) -> &dyn Any;
}

// =============================================================================
// Carpet Area Rule
// =============================================================================

/// Prices carpets by area and cut type.
///
/// ## Example
/// ```rust
/// use carpet_core::config::CarpetAreaConfig;
/// use carpet_core::money::{Currency, Money};
/// use carpet_core::pricing::PriceBook;
/// use carpet_core::rule::{CarpetAreaRule, PricingRule};
/// use carpet_core::types::{CutType, OptionSelection, VariantId};
///
/// let rule = CarpetAreaRule::new(CarpetAreaConfig::default()).unwrap();
/// let prices = PriceBook::new()
///     .with_price("v1", Currency::eur(), CutType::StandardCut, Money::from_cents(1000));
///
/// let selection = OptionSelection::new()
///     .with("Width", "4")
///     .with("Height", "3")
///     .with("Type", "glattschnitt");
///
/// let price = rule.compute(&selection, &VariantId::from("v1"), &prices).unwrap();
/// assert_eq!(price, Money::from_cents(11000)); // 12 m² × 10 − 10
/// ```
#[derive(Debug, Clone)]
pub struct CarpetAreaRule {
    config: CarpetAreaConfig,
}

/// Parsed and validated selection.
#[derive(Debug, Clone, Copy)]
struct Measurements {
    width: Decimal,
    height: Decimal,
    cut_type: CutType,
    overedging: bool,
}

impl CarpetAreaRule {
    pub const NAME: &'static str = "carpet_area";

    /// Builds the rule, rejecting inconsistent configuration.
    pub fn new(config: CarpetAreaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(CarpetAreaRule { config })
    }

    /// Returns the configuration the rule was built with.
    pub fn config(&self) -> &CarpetAreaConfig {
        &self.config
    }

    /// Parses and validates a selection.
    ///
    /// ## Check Order
    /// 1. Width, Height and Type present
    /// 2. Type is a known cut type
    /// 3. Width: catalogue width (standard-cut) or within bounds (custom-cut)
    /// 4. Height within bounds
    /// 5. Overedging "1" is refused while a positive multiplier is set
    fn measure(&self, selection: &OptionSelection) -> ValidationResult<Measurements> {
        validate_required(selection, &OptionName::REQUIRED)?;
        let value = |name: OptionName| selection.get(name).unwrap_or_default();

        let cut_type: CutType = value(OptionName::Type).parse()?;

        let width = parse_decimal(OptionName::Width.as_str(), value(OptionName::Width))?;
        match cut_type {
            CutType::StandardCut => validate_standard_width(width, &self.config.widths)?,
            CutType::CustomCut => validate_range(
                OptionName::Width.as_str(),
                width,
                self.config.min_width,
                self.config.max_width,
            )?,
        }

        let height = parse_decimal(OptionName::Height.as_str(), value(OptionName::Height))?;
        validate_range(
            OptionName::Height.as_str(),
            height,
            self.config.min_height,
            self.config.max_height,
        )?;

        // Inverted relative to the name: overedging is refused when a
        // multiplier is set. Kept until product owners confirm the intent.
        let overedging = selection.get(OptionName::Overedging);
        if self.config.has_positive_multiplier() && overedging.is_some_and(|v| v.trim() == "1") {
            return Err(ValidationError::OveredgingNotAllowed);
        }

        Ok(Measurements {
            width,
            height,
            cut_type,
            overedging: overedging.is_some(),
        })
    }

    /// Computes the price delta together with its breakdown.
    pub fn quote(
        &self,
        selection: &OptionSelection,
        variant: &VariantId,
        prices: &dyn PriceLookup,
    ) -> Result<Quote, RuleError> {
        let m = self.measure(selection).inspect_err(|reason| {
            debug!(%variant, %reason, "carpet selection rejected");
        })?;

        let eur = Currency::eur();
        let unit_price = prices.amount_in(variant, &eur, m.cut_type)?;
        let base_price = prices.amount_in(variant, &eur, CutType::StandardCut)?;

        let area = m.width * m.height;
        let priced_area = area.max(self.config.min_pricing_area);

        let overedging = if m.overedging {
            let multiplier = self.config.overedging_multiplier.unwrap_or(Decimal::ZERO);
            Money::new(dec!(2) * (m.width + m.height) * multiplier)
        } else {
            Money::zero()
        };

        let total = unit_price * priced_area - base_price + overedging;

        debug!(
            %variant,
            width = %m.width,
            height = %m.height,
            cut_type = %m.cut_type,
            %priced_area,
            %total,
            "carpet price computed"
        );

        Ok(Quote {
            width: m.width,
            height: m.height,
            cut_type: m.cut_type,
            area,
            priced_area,
            unit_price,
            base_price,
            overedging,
            total,
        })
    }

    /// Computes the price, writing an error message into the selection when
    /// it cannot be priced.
    ///
    /// For storefronts that display the selection back to the customer: on
    /// an invalid selection Width and Height become `"0"`, Type becomes
    /// [`INVALID_SELECTION_MESSAGE`] and the price is zero. Missing prices
    /// are still returned as errors.
    pub fn compute_with_feedback(
        &self,
        selection: &mut OptionSelection,
        variant: &VariantId,
        prices: &dyn PriceLookup,
    ) -> Result<Money, LookupError> {
        match self.compute(selection, variant, prices) {
            Ok(total) => Ok(total),
            Err(RuleError::Invalid(reason)) => {
                warn!(%variant, %reason, "invalid carpet selection, resetting options");
                selection.set(OptionName::Width, "0");
                selection.set(OptionName::Height, "0");
                selection.set(OptionName::Type, INVALID_SELECTION_MESSAGE);
                Ok(Money::zero())
            }
            Err(RuleError::Lookup(err)) => Err(err),
        }
    }
}

impl PricingRule for CarpetAreaRule {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        "Carpet Area Calculator (Based on Price Type)"
    }

    fn options(&self) -> Vec<OptionDefinition> {
        OptionName::ALL.into_iter().map(OptionDefinition::from).collect()
    }

    fn check(&self, selection: &OptionSelection) -> Result<(), ValidationError> {
        self.measure(selection).map(|_| ())
    }

    fn compute(
        &self,
        selection: &OptionSelection,
        variant: &VariantId,
        prices: &dyn PriceLookup,
    ) -> Result<Money, RuleError> {
        self.quote(selection, variant, prices).map(|quote| quote.total)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PriceBook;

    fn rule() -> CarpetAreaRule {
        CarpetAreaRule::new(CarpetAreaConfig::default().overedging_multiplier(Some(dec!(0))))
            .unwrap()
    }

    fn prices(unit: Decimal, base: Decimal) -> PriceBook {
        PriceBook::new()
            .with_price("v1", Currency::eur(), CutType::CustomCut, Money::new(unit))
            .with_price("v1", Currency::eur(), CutType::StandardCut, Money::new(base))
    }

    fn selection(width: &str, height: &str, cut: &str) -> OptionSelection {
        OptionSelection::new()
            .with(OptionName::Width, width)
            .with(OptionName::Height, height)
            .with(OptionName::Type, cut)
    }

    #[test]
    fn test_rejects_inconsistent_config() {
        let config = CarpetAreaConfig::default().height_range(dec!(10), dec!(2));
        assert!(CarpetAreaRule::new(config).is_err());
    }

    #[test]
    fn test_check_reports_reason() {
        let rule = rule();
        assert_eq!(
            rule.check(&selection("4", "3", "velours")),
            Err(ValidationError::UnknownCutType {
                value: "velours".to_string()
            })
        );
        assert!(matches!(
            rule.check(&selection("4.5", "3", "glattschnitt")),
            Err(ValidationError::WidthNotStandard { .. })
        ));
        assert!(matches!(
            rule.check(&selection("4", "15", "glattschnitt")),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            rule.check(&selection("vier", "3", "raummass")),
            Err(ValidationError::MalformedNumber { .. })
        ));
    }

    #[test]
    fn test_custom_cut_accepts_any_width_in_range() {
        let rule = rule();
        assert!(rule.validate(&selection("4,5", "3", "raummass")));
        assert!(rule.validate(&selection("1", "1", "raummass")));
        assert!(rule.validate(&selection("5", "14", "raummass")));
        assert!(!rule.validate(&selection("0,99", "3", "raummass")));
    }

    #[test]
    fn test_custom_cut_price() {
        let rule = rule();
        // 4.5 × 3 = 13.5 m² at 20 minus base 15
        let quote = rule
            .quote(&selection("4,5", "3", "raummass"), &"v1".into(), &prices(dec!(20), dec!(15)))
            .unwrap();

        assert_eq!(quote.area, dec!(13.5));
        assert_eq!(quote.priced_area, dec!(13.5));
        assert_eq!(quote.unit_price, Money::new(dec!(20)));
        assert_eq!(quote.base_price, Money::new(dec!(15)));
        assert_eq!(quote.total, Money::new(dec!(255)));
    }

    #[test]
    fn test_minimum_priced_area_applies() {
        let config = CarpetAreaConfig::default().min_pricing_area(dec!(6));
        let rule = CarpetAreaRule::new(config).unwrap();

        let quote = rule
            .quote(&selection("1", "2", "raummass"), &"v1".into(), &prices(dec!(10), dec!(0)))
            .unwrap();

        assert_eq!(quote.area, dec!(2));
        assert_eq!(quote.priced_area, dec!(6));
        assert_eq!(quote.total, Money::new(dec!(60)));
    }

    #[test]
    fn test_total_may_be_negative() {
        let total = rule()
            .compute(&selection("1", "1", "raummass"), &"v1".into(), &prices(dec!(5), dec!(30)))
            .unwrap();
        assert_eq!(total, Money::new(dec!(-25)));
    }

    #[test]
    fn test_overedging_surcharge_uses_perimeter() {
        let config = CarpetAreaConfig::default().overedging_multiplier(Some(dec!(2.5)));
        let rule = CarpetAreaRule::new(config).unwrap();

        let with_edges = selection("4", "3", "raummass").with(OptionName::Overedging, "yes");
        let quote = rule
            .quote(&with_edges, &"v1".into(), &prices(dec!(10), dec!(10)))
            .unwrap();

        // 2 × (4 + 3) × 2.5
        assert_eq!(quote.overedging, Money::new(dec!(35)));
        assert_eq!(quote.total, Money::new(dec!(145)));
    }

    #[test]
    fn test_overedging_surcharge_applies_for_any_present_value() {
        let config = CarpetAreaConfig::default().overedging_multiplier(Some(dec!(2.5)));
        let rule = CarpetAreaRule::new(config).unwrap();

        for value in ["0", "false", "", "no"] {
            let sel = selection("4", "3", "raummass").with(OptionName::Overedging, value);
            let quote = rule
                .quote(&sel, &"v1".into(), &prices(dec!(10), dec!(10)))
                .unwrap();
            assert_eq!(quote.overedging, Money::new(dec!(35)), "value {value:?}");
            assert_eq!(quote.total, Money::new(dec!(145)));
        }

        let without = rule
            .quote(&selection("4", "3", "raummass"), &"v1".into(), &prices(dec!(10), dec!(10)))
            .unwrap();
        assert!(without.overedging.is_zero());
    }

    #[test]
    fn test_overedging_one_refused_with_positive_multiplier() {
        let config = CarpetAreaConfig::default().overedging_multiplier(Some(dec!(2.5)));
        let rule = CarpetAreaRule::new(config).unwrap();

        let flagged = selection("4", "3", "raummass").with(OptionName::Overedging, "1");
        assert_eq!(rule.check(&flagged), Err(ValidationError::OveredgingNotAllowed));

        // Zero or absent multiplier: accepted, surcharge is zero
        let flagged_zero = rule_with_multiplier(Some(dec!(0)));
        assert!(flagged_zero.validate(&flagged));
        let absent = rule_with_multiplier(None);
        let quote = absent
            .quote(&flagged, &"v1".into(), &prices(dec!(10), dec!(10)))
            .unwrap();
        assert!(quote.overedging.is_zero());
    }

    fn rule_with_multiplier(multiplier: Option<Decimal>) -> CarpetAreaRule {
        CarpetAreaRule::new(CarpetAreaConfig::default().overedging_multiplier(multiplier)).unwrap()
    }

    #[test]
    fn test_missing_price_propagates() {
        let book = PriceBook::new().with_price(
            "v1",
            Currency::eur(),
            CutType::StandardCut,
            Money::new(dec!(10)),
        );
        let err = rule()
            .compute(&selection("4", "3", "raummass"), &"v1".into(), &book)
            .unwrap_err();
        assert!(matches!(err, RuleError::Lookup(LookupError::NotFound { .. })));
    }

    #[test]
    fn test_feedback_passes_lookup_error_through() {
        let mut sel = selection("4", "3", "raummass");
        let before = sel.clone();

        let err = rule()
            .compute_with_feedback(&mut sel, &"v1".into(), &PriceBook::new())
            .unwrap_err();

        assert_eq!(
            err,
            LookupError::NotFound {
                variant: "v1".to_string(),
                currency: "EUR".to_string(),
                category: "raummass".to_string(),
            }
        );
        assert_eq!(sel, before);
    }

    #[test]
    fn test_feedback_leaves_valid_selection_alone() {
        let mut sel = selection("4", "3", "glattschnitt");
        let total = rule()
            .compute_with_feedback(&mut sel, &"v1".into(), &prices(dec!(10), dec!(10)))
            .unwrap();

        assert_eq!(total, Money::new(dec!(110)));
        assert_eq!(sel, selection("4", "3", "glattschnitt"));
    }

    #[test]
    fn test_metadata() {
        let rule = rule();
        assert_eq!(rule.name(), "carpet_area");
        assert_eq!(
            rule.description(),
            "Carpet Area Calculator (Based on Price Type)"
        );
        let names: Vec<_> = rule.options().into_iter().map(|o| o.name).collect();
        assert_eq!(names, ["Width", "Height", "Type", "Overedging"]);
    }
}
