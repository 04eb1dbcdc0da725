//! # carpet-core: Pure Pricing Logic for Carpet Customizations
//!
//! This crate decides whether a customer's carpet configuration is valid
//! and what it costs. It contains no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Carpet Pricing Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront / carpet-quote CLI                      │   │
//! │  │     Width "4,5" ── Height "3" ── Type "raummass" ── Overedging  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ OptionSelection                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ carpet-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   rule    │  │  pricing  │  │ validation│  │   │
//! │  │   │ Selection │  │ CarpetArea│  │ PriceBook │  │  parsing  │  │   │
//! │  │   │  CutType  │  │ RuleTable │  │PriceLookup│  │  bounds   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              carpet-db (prices, option values)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (OptionSelection, CutType, Quote, ...)
//! - [`money`] - Decimal money and currency codes
//! - [`config`] - Carpet area rule configuration
//! - [`rule`] - The `PricingRule` interface and the carpet area rule
//! - [`registry`] - Explicit rule table
//! - [`pricing`] - Price lookup seam and in-memory price book
//! - [`validation`] - Parsing and bound checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use carpet_core::{CarpetAreaConfig, CarpetAreaRule, Currency, CutType, Money, PriceBook};
//! use carpet_core::{OptionSelection, PricingRule, VariantId};
//! use rust_decimal_macros::dec;
//!
//! let rule = CarpetAreaRule::new(CarpetAreaConfig::default()).unwrap();
//! let prices = PriceBook::new()
//!     .with_price("v1", Currency::eur(), CutType::StandardCut, Money::new(dec!(10)))
//!     .with_price("v1", Currency::eur(), CutType::CustomCut, Money::new(dec!(14)));
//!
//! let selection = OptionSelection::new()
//!     .with("Width", "4,5")
//!     .with("Height", "3")
//!     .with("Type", "raummass");
//!
//! // 13.5 m² × 14 − 10
//! let price = rule.compute(&selection, &VariantId::from("v1"), &prices).unwrap();
//! assert_eq!(price.amount(), dec!(179));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod registry;
pub mod rule;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use config::CarpetAreaConfig;
pub use error::{ConfigError, CoreError, CoreResult, LookupError, RuleError, ValidationError};
pub use money::{Currency, Money};
pub use pricing::{PriceBook, PriceLookup};
pub use registry::RuleTable;
pub use rule::{CarpetAreaRule, PricingRule, INVALID_SELECTION_MESSAGE};
pub use types::*;
