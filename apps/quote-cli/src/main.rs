//! # carpet-quote
//!
//! Command-line front end for the carpet area pricing rule.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CLI Startup                                     │
//! │                                                                         │
//! │  1. Initialize tracing (stderr, RUST_LOG)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Parse arguments (clap)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Load CarpetAreaConfig (defaults → --config TOML → CARPET_* env)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. Build RuleTable                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. Open database (quote, options only)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  6. Run command, print to stdout                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;
mod settings;

use std::process::ExitCode;

use anyhow::{Context, Result};
use carpet_core::RuleTable;
use carpet_db::{Database, DbConfig};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let settings = settings::load(cli.config.as_deref())?;
    let rules = RuleTable::with_defaults(settings)?;

    match &cli.command {
        Command::Validate(args) => commands::validate::run(&rules, args),
        Command::Rules => {
            commands::rules::run(&rules)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Quote(args) => {
            let rule = rules.carpet_area()?;
            let db = open_database(&cli).await?;
            let code = commands::quote::run(&db, rule, args).await;
            db.close().await;
            code
        }
        Command::Options(args) => {
            let db = open_database(&cli).await?;
            let result = commands::options::run(&db, args).await;
            db.close().await;
            result.map(|()| ExitCode::SUCCESS)
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// ## Log Levels
/// Set `RUST_LOG` environment variable to control logging:
/// - `RUST_LOG=debug` - Show rule decisions
/// - `RUST_LOG=carpet_core=debug,sqlx=warn` - Rule detail without SQL noise
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn open_database(cli: &Cli) -> Result<Database> {
    debug!(path = %cli.database.display(), "Opening database");
    Database::new(DbConfig::new(&cli.database))
        .await
        .with_context(|| format!("failed to open database {}", cli.database.display()))
}
