//! # Carpet Area Configuration
//!
//! Bounds and pricing parameters of the carpet area rule.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CARPET_*`), see [`CarpetAreaConfig::apply_env`]
//! 2. Config file (`[carpet_area]` table, loaded by the CLI)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is immutable once a rule has been built from it, so rules
//! can be shared across threads without locking.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;
use crate::validation::{format_width_list, parse_width_list};

/// Configuration of the carpet area rule.
///
/// ## Example (TOML)
/// ```toml
/// [carpet_area]
/// min_width = 1
/// max_width = 5
/// min_height = 1
/// max_height = 14
/// widths = "4,5"
/// min_pricing_area = 1
/// overedging_multiplier = "2.5"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarpetAreaConfig {
    /// Smallest custom-cut width in metres.
    pub min_width: Decimal,

    /// Largest custom-cut width in metres.
    pub max_width: Decimal,

    pub min_height: Decimal,
    pub max_height: Decimal,

    /// Catalogue widths for standard-cut carpets.
    /// Written as a comma separated string, e.g. `"4,5"`.
    #[serde(with = "width_list")]
    pub widths: Vec<Decimal>,

    /// Area in m² charged at minimum, however small the carpet.
    pub min_pricing_area: Decimal,

    /// Price per metre of edge for overedging. `None` disables the surcharge.
    pub overedging_multiplier: Option<Decimal>,
}

impl Default for CarpetAreaConfig {
    /// ## Default Values
    /// - Width: 1 to 5 m, standard widths 4 and 5 m
    /// - Height: 1 to 14 m
    /// - Minimum priced area: 1 m²
    /// - No overedging multiplier
    fn default() -> Self {
        CarpetAreaConfig {
            min_width: dec!(1),
            max_width: dec!(5),
            min_height: dec!(1),
            max_height: dec!(14),
            widths: vec![dec!(4), dec!(5)],
            min_pricing_area: dec!(1),
            overedging_multiplier: None,
        }
    }
}

impl CarpetAreaConfig {
    /// Sets the custom-cut width bounds.
    pub fn width_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Sets the height bounds.
    pub fn height_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    /// Sets the standard-cut catalogue widths.
    pub fn standard_widths(mut self, widths: impl Into<Vec<Decimal>>) -> Self {
        self.widths = widths.into();
        self
    }

    /// Sets the minimum priced area.
    pub fn min_pricing_area(mut self, area: Decimal) -> Self {
        self.min_pricing_area = area;
        self
    }

    /// Sets (or clears) the overedging multiplier.
    pub fn overedging_multiplier(mut self, multiplier: Option<Decimal>) -> Self {
        self.overedging_multiplier = multiplier;
        self
    }

    /// Whether a strictly positive overedging multiplier is configured.
    pub fn has_positive_multiplier(&self) -> bool {
        self.overedging_multiplier
            .is_some_and(|multiplier| multiplier > Decimal::ZERO)
    }

    /// Checks internal consistency.
    ///
    /// ## Rules
    /// - `min_width <= max_width`, `min_height <= max_height`
    /// - at least one standard width
    /// - no negative area or multiplier
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_width > self.max_width {
            return Err(ConfigError::InvertedBounds {
                field: "width".to_string(),
                min: self.min_width,
                max: self.max_width,
            });
        }

        if self.min_height > self.max_height {
            return Err(ConfigError::InvertedBounds {
                field: "height".to_string(),
                min: self.min_height,
                max: self.max_height,
            });
        }

        if self.widths.is_empty() {
            return Err(ConfigError::NoStandardWidths);
        }

        if self.min_pricing_area < Decimal::ZERO {
            return Err(ConfigError::Negative {
                field: "min_pricing_area".to_string(),
            });
        }

        if self
            .overedging_multiplier
            .is_some_and(|multiplier| multiplier < Decimal::ZERO)
        {
            return Err(ConfigError::Negative {
                field: "overedging_multiplier".to_string(),
            });
        }

        Ok(())
    }

    /// Applies `CARPET_*` environment overrides.
    ///
    /// ## Environment Variables
    /// - `CARPET_MIN_WIDTH`, `CARPET_MAX_WIDTH`
    /// - `CARPET_MIN_HEIGHT`, `CARPET_MAX_HEIGHT`
    /// - `CARPET_WIDTHS` (e.g. "4,5")
    /// - `CARPET_MIN_PRICING_AREA`
    /// - `CARPET_OVEREDGING_MULTIPLIER` (empty string clears it)
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key/value source.
    pub fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let decimal = |key: &str| -> Result<Option<Decimal>, ConfigError> {
            lookup(key)
                .map(|value| parse_setting(key, &value))
                .transpose()
        };

        if let Some(v) = decimal("CARPET_MIN_WIDTH")? {
            self.min_width = v;
        }
        if let Some(v) = decimal("CARPET_MAX_WIDTH")? {
            self.max_width = v;
        }
        if let Some(v) = decimal("CARPET_MIN_HEIGHT")? {
            self.min_height = v;
        }
        if let Some(v) = decimal("CARPET_MAX_HEIGHT")? {
            self.max_height = v;
        }
        if let Some(widths) = lookup("CARPET_WIDTHS") {
            self.widths = parse_width_list(&widths)?;
        }
        if let Some(v) = decimal("CARPET_MIN_PRICING_AREA")? {
            self.min_pricing_area = v;
        }
        if let Some(raw) = lookup("CARPET_OVEREDGING_MULTIPLIER") {
            self.overedging_multiplier = if raw.trim().is_empty() {
                None
            } else {
                Some(parse_setting("CARPET_OVEREDGING_MULTIPLIER", &raw)?)
            };
        }

        Ok(self)
    }
}

fn parse_setting(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(value.trim()).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Serde adapter for the `"4,5"` width list notation.
mod width_list {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_width_list, parse_width_list};

    pub fn serialize<S: Serializer>(widths: &[Decimal], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_width_list(widths))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Decimal>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_width_list(&raw).map_err(serde::de::Error::custom)
    }
}
