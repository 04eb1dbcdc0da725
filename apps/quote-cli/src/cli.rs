//! Command-line parsing for `carpet-quote`.
//!
//! Argument parsing stays here; each subcommand's work lives in
//! [`crate::commands`].

use std::path::PathBuf;

use carpet_core::{OptionName, OptionSelection};
use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "carpet-quote",
    version,
    about = "Carpet area price quotes (glattschnitt / raummass)"
)]
pub struct Cli {
    /// TOML file with a `[carpet_area]` section.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database holding variants, prices and option values.
    #[arg(long, global = true, env = "CARPET_DATABASE_PATH", default_value = "carpet.db")]
    pub database: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a selection for a stored variant and print the breakdown as JSON.
    Quote(QuoteArgs),
    /// Check a selection against the configured bounds without pricing it.
    Validate(SelectionArgs),
    /// List option values and their descriptions.
    Options(OptionsArgs),
    /// List the registered pricing rules.
    Rules,
}

/// Raw option values as a storefront would submit them.
///
/// Values are passed through untouched; the rule does all parsing.
#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Width in metres ("4,5" and "4.5" are equivalent).
    #[arg(long, allow_hyphen_values = true)]
    pub width: Option<String>,

    /// Height in metres.
    #[arg(long, allow_hyphen_values = true)]
    pub height: Option<String>,

    /// Cut type: glattschnitt or raummass.
    #[arg(long = "type")]
    pub cut_type: Option<String>,

    /// Overedging flag ("1" requests overedging).
    #[arg(long)]
    pub overedging: Option<String>,
}

impl SelectionArgs {
    /// Builds the option selection, leaving out options that were not given.
    pub fn to_selection(&self) -> OptionSelection {
        [
            (OptionName::Width, &self.width),
            (OptionName::Height, &self.height),
            (OptionName::Type, &self.cut_type),
            (OptionName::Overedging, &self.overedging),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|value| (name.to_string(), value)))
        .collect()
    }
}

#[derive(Debug, Clone, Args)]
pub struct QuoteArgs {
    /// Variant SKU.
    #[arg(long)]
    pub variant: String,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(Debug, Clone, Args)]
pub struct OptionsArgs {
    /// Only list values of this option type (e.g. Type).
    #[arg(long)]
    pub option_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_quote_command() {
        let cli = Cli::try_parse_from([
            "carpet-quote",
            "quote",
            "--variant",
            "BERBER-400",
            "--width",
            "4,5",
            "--height",
            "3",
            "--type",
            "raummass",
        ])
        .unwrap();

        let Command::Quote(args) = cli.command else {
            panic!("expected quote command");
        };
        assert_eq!(args.variant, "BERBER-400");

        let selection = args.selection.to_selection();
        assert_eq!(selection.get(OptionName::Width), Some("4,5"));
        assert_eq!(selection.get(OptionName::Type), Some("raummass"));
        assert!(!selection.contains(OptionName::Overedging));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "carpet-quote",
            "validate",
            "--width",
            "-4",
            "--database",
            "/tmp/shop.db",
        ])
        .unwrap();

        assert_eq!(cli.database, PathBuf::from("/tmp/shop.db"));
        let Command::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.width.as_deref(), Some("-4"));
        assert_eq!(args.height, None);
    }

    #[test]
    fn test_quote_requires_variant() {
        assert!(Cli::try_parse_from(["carpet-quote", "quote", "--width", "4"]).is_err());
    }
}
