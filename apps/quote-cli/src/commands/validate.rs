//! `carpet-quote validate`: check a selection without touching prices.

use std::process::ExitCode;

use anyhow::Result;
use carpet_core::{CarpetAreaRule, RuleTable};

use crate::cli::SelectionArgs;

pub fn run(rules: &RuleTable, args: &SelectionArgs) -> Result<ExitCode> {
    let rule = rules.require(CarpetAreaRule::NAME)?;

    match rule.check(&args.to_selection()) {
        Ok(()) => {
            println!("valid");
            Ok(ExitCode::SUCCESS)
        }
        Err(reason) => {
            println!("invalid: {}", reason);
            Ok(ExitCode::FAILURE)
        }
    }
}
