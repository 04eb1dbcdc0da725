//! # Commands
//!
//! One module per `carpet-quote` subcommand. Commands print their result to
//! stdout and report through the returned [`ExitCode`](std::process::ExitCode)
//! whether the selection was usable.

pub mod options;
pub mod quote;
pub mod rules;
pub mod validate;

use anyhow::Result;
use serde::Serialize;

/// Prints a value as pretty JSON on stdout.
pub(crate) fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
