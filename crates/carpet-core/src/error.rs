//! # Error Types
//!
//! Domain-specific error types for carpet-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  carpet-core errors (this file)                                        │
//! │  ├── ValidationError  - Why a customer selection was rejected          │
//! │  ├── ConfigError      - Rule configuration is inconsistent             │
//! │  ├── LookupError      - No price for (variant, currency, category)     │
//! │  ├── RuleError        - What `compute` can fail with                   │
//! │  └── CoreError        - Rule table + wrapping of the above             │
//! │                                                                         │
//! │  carpet-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → RuleError → CoreError → anyhow (CLI)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value, bounds)
//! 3. Errors are enum variants, never String
//! 4. An invalid selection is a value, not a panic: the caller decides how
//!    to render it

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Reasons a customer's option selection is rejected by a pricing rule.
///
/// Every variant maps to exactly one check in
/// [`CarpetAreaRule::check`](crate::rule::CarpetAreaRule).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required option is missing from the selection.
    #[error("{field} is required")]
    Required { field: String },

    /// The Type option is not one of the known cut types.
    #[error("unknown cut type '{value}'")]
    UnknownCutType { value: String },

    /// Width or Height is not a decimal number.
    ///
    /// ## When This Occurs
    /// - Empty string
    /// - Letters or units in the value ("4m", "abc")
    /// - Several decimal separators ("4,5,6")
    #[error("{field} is not a number: '{value}'")]
    MalformedNumber { field: String, value: String },

    /// Standard-cut carpets only come in catalogue widths.
    #[error("width {width} is not a standard width (allowed: {allowed:?})")]
    WidthNotStandard { width: Decimal, allowed: Vec<Decimal> },

    /// Numeric value is outside its inclusive bounds.
    #[error("{field} {value} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        value: Decimal,
        min: Decimal,
        max: Decimal,
    },

    /// Overedging was requested while a positive multiplier is configured.
    #[error("overedging is not available for this product")]
    OveredgingNotAllowed,
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration errors, raised once when a rule is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Lower bound exceeds upper bound.
    #[error("{field}: minimum {min} exceeds maximum {max}")]
    InvertedBounds {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// The comma separated standard width list could not be parsed.
    #[error("invalid standard width list '{0}'")]
    InvalidWidths(String),

    /// The standard width list is empty.
    #[error("at least one standard width is required")]
    NoStandardWidths,

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// An override (environment variable or file) held an unparsable value.
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Lookup Error
// =============================================================================

/// Errors raised by a [`PriceLookup`](crate::pricing::PriceLookup).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No price is configured for the combination.
    #[error("no {currency} price in category '{category}' for variant {variant}")]
    NotFound {
        variant: String,
        currency: String,
        category: String,
    },
}

// =============================================================================
// Rule Error
// =============================================================================

/// Errors returned from [`PricingRule::compute`](crate::rule::PricingRule::compute).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The selection did not pass validation.
    #[error("invalid selection: {0}")]
    Invalid(#[from] ValidationError),

    /// A price needed for the calculation is missing.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl RuleError {
    /// Returns the validation reason if the selection itself was rejected.
    pub fn invalid_reason(&self) -> Option<&ValidationError> {
        match self {
            RuleError::Invalid(reason) => Some(reason),
            RuleError::Lookup(_) => None,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// General errors of the pricing core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A rule with the same name is already registered.
    #[error("pricing rule '{0}' is already registered")]
    DuplicateRule(String),

    /// No rule is registered under that name.
    #[error("unknown pricing rule '{0}'")]
    UnknownRule(String),

    /// Configuration error (wraps ConfigError).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule evaluation error (wraps RuleError).
    #[error(transparent)]
    Rule(#[from] RuleError),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
