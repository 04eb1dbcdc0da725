//! # Validation Module
//!
//! Parsing and bound checks for raw storefront option values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront form                                              │
//! │  ├── Width/Height inputs, Type dropdown                                │
//! │  └── Posts raw strings, German users type "4,5"                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── parse_decimal: comma → dot, explicit MalformedNumber              │
//! │  └── validate_range / validate_standard_width                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: CarpetAreaRule::check                                        │
//! │  └── Combines the checks per cut type                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use carpet_core::validation::{parse_decimal, validate_range};
//! use rust_decimal_macros::dec;
//!
//! let width = parse_decimal("Width", "4,5").unwrap();
//! assert_eq!(width, dec!(4.5));
//! assert!(validate_range("Width", width, dec!(1), dec!(5)).is_ok());
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{ConfigError, ValidationError};
use crate::types::{OptionName, OptionSelection};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Parses a measurement entered by a customer.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - A comma is the decimal separator ("4,5" ≡ "4.5")
/// - Anything else that is not a plain decimal is `MalformedNumber`
///
/// ## Example
/// ```rust
/// use carpet_core::validation::parse_decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_decimal("Width", "4,5").unwrap(), dec!(4.5));
/// assert_eq!(parse_decimal("Width", "4.5").unwrap(), dec!(4.5));
/// assert!(parse_decimal("Width", "4m").is_err());
/// ```
pub fn parse_decimal(field: &str, raw: &str) -> ValidationResult<Decimal> {
    let normalised = raw.trim().replace(',', ".");

    if normalised.is_empty() {
        return Err(malformed(field, raw));
    }

    Decimal::from_str(&normalised).map_err(|_| malformed(field, raw))
}

fn malformed(field: &str, raw: &str) -> ValidationError {
    ValidationError::MalformedNumber {
        field: field.to_string(),
        value: raw.to_string(),
    }
}

/// Parses the configured list of standard widths, e.g. `"4,5"` → `[4, 5]`.
///
/// Here the comma separates list items, so individual widths use a dot
/// (`"3.66,4,5"`). Empty items are skipped.
pub fn parse_width_list(raw: &str) -> Result<Vec<Decimal>, ConfigError> {
    let widths = raw
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(Decimal::from_str)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ConfigError::InvalidWidths(raw.to_string()))?;

    if widths.is_empty() {
        return Err(ConfigError::NoStandardWidths);
    }

    Ok(widths)
}

/// Formats standard widths back into their comma separated form.
pub fn format_width_list(widths: &[Decimal]) -> String {
    widths
        .iter()
        .map(|w| w.normalize().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

// =============================================================================
// Bound Checks
// =============================================================================

/// Checks `min <= value <= max`.
pub fn validate_range(
    field: &str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }

    Ok(())
}

/// Checks that a width is one of the catalogue widths.
///
/// Comparison is numeric, so `4`, `4.0` and `4,00` all match a configured `4`.
pub fn validate_standard_width(width: Decimal, allowed: &[Decimal]) -> ValidationResult<()> {
    if allowed.contains(&width) {
        return Ok(());
    }

    Err(ValidationError::WidthNotStandard {
        width,
        allowed: allowed.to_vec(),
    })
}

// =============================================================================
// Selection Checks
// =============================================================================

/// Fails with the first required option missing from the selection.
pub fn validate_required(selection: &OptionSelection, required: &[OptionName]) -> ValidationResult<()> {
    match selection.missing(required).first() {
        Some(name) => Err(ValidationError::Required {
            field: name.to_string(),
        }),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
