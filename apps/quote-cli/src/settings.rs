//! # Settings
//!
//! Loads the [`CarpetAreaConfig`] the rule is built from.
//!
//! ## Sources (Priority Order)
//! 1. Environment variables (`CARPET_*`, see [`CarpetAreaConfig::apply_env`])
//! 2. Config file (`--config path`, section `[carpet_area]`)
//! 3. Defaults
//!
//! ```toml
//! [carpet_area]
//! min_width = 1
//! max_width = 5
//! widths = "4,5"
//! min_pricing_area = 4
//! overedging_multiplier = 2.5
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use carpet_core::CarpetAreaConfig;
use config::{Config, File, FileFormat};
use tracing::debug;

/// Table holding the rule settings inside the config file.
const SECTION: &str = "carpet_area";

/// Loads settings from the optional file, then applies environment overrides.
pub fn load(path: Option<&Path>) -> Result<CarpetAreaConfig> {
    load_with_env(path, |key| std::env::var(key).ok())
}

/// [`load`] with the environment supplied by `env`.
fn load_with_env(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<CarpetAreaConfig> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        debug!(path = %path.display(), "Reading config file");
        builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
    }

    let file = builder
        .build()
        .with_context(|| match path {
            Some(path) => format!("failed to read config file {}", path.display()),
            None => "failed to assemble configuration".to_string(),
        })?;

    let settings = from_config(&file)?
        .apply_overrides(env)
        .context("invalid CARPET_* environment override")?;
    settings.validate().context("invalid carpet area configuration")?;

    debug!(?settings, "Carpet area settings loaded");
    Ok(settings)
}

/// Extracts the `[carpet_area]` table, falling back to defaults when absent.
fn from_config(file: &Config) -> Result<CarpetAreaConfig> {
    match file.get::<CarpetAreaConfig>(SECTION) {
        Ok(settings) => Ok(settings),
        Err(config::ConfigError::NotFound(_)) => Ok(CarpetAreaConfig::default()),
        Err(err) => Err(err).context("invalid [carpet_area] section"),
    }
}
