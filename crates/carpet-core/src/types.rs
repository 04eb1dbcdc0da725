//! # Domain Types
//!
//! Core domain types used throughout carpet pricing.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ OptionSelection │   │    CutType      │   │     Quote       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Width  → "4,5" │   │  StandardCut    │   │  priced_area    │       │
//! │  │  Height → "3"   │   │  (glattschnitt) │   │  unit_price     │       │
//! │  │  Type   → "..." │   │  CustomCut      │   │  base_price     │       │
//! │  │  Overedging     │   │  (raummass)     │   │  total          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Variant      │   │ OptionDefinition│   │   OptionValue   │       │
//! │  │  id, sku, name  │   │ name            │   │ name            │       │
//! │  │                 │   │ presentation    │   │ description     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Option values arrive as raw strings exactly as the storefront form
//! posted them; parsing happens in the rule, never here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Option Names
// =============================================================================

/// The customizable options the carpet rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    Width,
    Height,
    Type,
    Overedging,
}

impl OptionName {
    /// Options that must be present before any computation.
    pub const REQUIRED: [OptionName; 3] = [OptionName::Width, OptionName::Height, OptionName::Type];

    /// Every option, in storefront display order.
    pub const ALL: [OptionName; 4] = [
        OptionName::Width,
        OptionName::Height,
        OptionName::Type,
        OptionName::Overedging,
    ];

    /// Key used in the selection map.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OptionName::Width => "Width",
            OptionName::Height => "Height",
            OptionName::Type => "Type",
            OptionName::Overedging => "Overedging",
        }
    }
}

impl AsRef<str> for OptionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Cut Type
// =============================================================================

/// Edge-finish pricing category of a carpet.
///
/// The serialized names are the price category names used in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum CutType {
    /// Fixed catalogue widths, cut to length only.
    #[serde(rename = "glattschnitt")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "glattschnitt"))]
    StandardCut,

    /// Cut to the room's exact measurements.
    #[serde(rename = "raummass")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "raummass"))]
    CustomCut,
}

impl CutType {
    pub const ALL: [CutType; 2] = [CutType::StandardCut, CutType::CustomCut];

    /// Catalogue name, also the price category name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CutType::StandardCut => "glattschnitt",
            CutType::CustomCut => "raummass",
        }
    }
}

impl fmt::Display for CutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the catalogue name. Surrounding whitespace is ignored, case is not.
impl FromStr for CutType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "glattschnitt" => Ok(CutType::StandardCut),
            "raummass" => Ok(CutType::CustomCut),
            other => Err(ValidationError::UnknownCutType {
                value: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Option Selection
// =============================================================================

/// A customer's raw option choices for one customized line item.
///
/// ## Example
/// ```rust
/// use carpet_core::types::{OptionName, OptionSelection};
///
/// let selection = OptionSelection::new()
///     .with(OptionName::Width, "4,5")
///     .with(OptionName::Height, "3")
///     .with(OptionName::Type, "raummass");
///
/// assert_eq!(selection.get(OptionName::Width), Some("4,5"));
/// assert!(!selection.contains(OptionName::Overedging));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSelection {
    values: BTreeMap<String, String>,
}

impl OptionSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        OptionSelection::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns the raw value of an option.
    pub fn get(&self, name: impl AsRef<str>) -> Option<&str> {
        self.values.get(name.as_ref()).map(String::as_str)
    }

    /// Checks whether an option is present.
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.values.contains_key(name.as_ref())
    }

    /// Sets (or overwrites) the raw value of an option.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.values.insert(name.as_ref().to_string(), value.into());
    }

    /// Removes an option, returning its previous value.
    pub fn remove(&mut self, name: impl AsRef<str>) -> Option<String> {
        self.values.remove(name.as_ref())
    }

    /// Names of options that are in `required` but not in this selection.
    pub fn missing(&self, required: &[OptionName]) -> Vec<OptionName> {
        required
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Iterates `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionSelection {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OptionSelection {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// Variant
// =============================================================================

/// Identifier of a purchasable product variant (UUID string).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
#[ts(export)]
pub struct VariantId(String);

impl VariantId {
    pub fn new(id: impl Into<String>) -> Self {
        VariantId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariantId {
    fn from(id: &str) -> Self {
        VariantId(id.to_string())
    }
}

/// A carpet product variant whose prices the rule scales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Variant {
    /// Unique identifier (UUID v4).
    pub id: VariantId,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name.
    pub name: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Options
// =============================================================================

/// An option a pricing rule asks the storefront to collect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionDefinition {
    /// Key in the [`OptionSelection`].
    pub name: String,

    /// Label shown to the customer.
    pub presentation: String,
}

impl OptionDefinition {
    pub fn new(name: impl Into<String>, presentation: impl Into<String>) -> Self {
        OptionDefinition {
            name: name.into(),
            presentation: presentation.into(),
        }
    }
}

impl From<OptionName> for OptionDefinition {
    fn from(name: OptionName) -> Self {
        OptionDefinition::new(name.as_str(), name.as_str())
    }
}

/// A selectable value of an option type, as maintained in the admin.
///
/// The `description` is free text shown next to the value (e.g. what
/// "raummass" means for delivery times).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OptionValue {
    pub id: String,
    pub option_type: String,
    pub name: String,
    pub presentation: String,
    pub description: Option<String>,
    pub position: i64,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Quote
// =============================================================================

/// Full breakdown of a computed carpet price delta.
///
/// `total` is what `compute` returns; the remaining fields explain it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quote {
    #[ts(as = "String")]
    pub width: Decimal,
    #[ts(as = "String")]
    pub height: Decimal,
    pub cut_type: CutType,

    /// Requested area in m².
    #[ts(as = "String")]
    pub area: Decimal,

    /// Area actually charged (never below the minimum priced area).
    #[ts(as = "String")]
    pub priced_area: Decimal,

    pub unit_price: Money,
    pub base_price: Money,
    pub overedging: Money,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_type_parsing() {
        assert_eq!("glattschnitt".parse::<CutType>(), Ok(CutType::StandardCut));
        assert_eq!(" raummass ".parse::<CutType>(), Ok(CutType::CustomCut));
        assert_eq!(
            "Raummass".parse::<CutType>(),
            Err(ValidationError::UnknownCutType {
                value: "Raummass".to_string()
            })
        );
    }

    #[test]
    fn test_cut_type_serde_uses_catalogue_names() {
        let json = serde_json::to_string(&CutType::CustomCut).unwrap();
        assert_eq!(json, "\"raummass\"");

        let parsed: CutType = serde_json::from_str("\"glattschnitt\"").unwrap();
        assert_eq!(parsed, CutType::StandardCut);
    }

    #[test]
    fn test_selection_set_and_missing() {
        let mut selection = OptionSelection::new().with(OptionName::Width, "4");
        selection.set("Height", "3");
        selection.set(OptionName::Height, "2");

        assert_eq!(selection.get("Height"), Some("2"));
        assert_eq!(selection.len(), 2);
        assert_eq!(
            selection.missing(&OptionName::REQUIRED),
            vec![OptionName::Type]
        );
    }

    #[test]
    fn test_selection_from_pairs_and_json() {
        let selection: OptionSelection =
            [("Width", "4"), ("Type", "glattschnitt")].into_iter().collect();
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["Width"], "4");

        let back: OptionSelection = serde_json::from_value(json).unwrap();
        assert_eq!(back, selection);
    }
}
