//! `carpet-quote quote`: price a selection for a stored variant.

use std::process::ExitCode;

use anyhow::{Context, Result};
use carpet_core::{
    CarpetAreaRule, Money, OptionSelection, PriceLookup, Quote, RuleError, VariantId,
};
use carpet_db::Database;
use serde::Serialize;
use tracing::info;

use super::print_json;
use crate::cli::QuoteArgs;

/// Result of pricing one selection.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QuoteOutcome {
    /// The selection was valid and priced.
    Priced { quote: Quote },
    /// The selection was rejected. `selection` is what a storefront would
    /// show back to the customer.
    Invalid {
        reason: String,
        total: Money,
        selection: OptionSelection,
    },
}

pub async fn run(db: &Database, rule: &CarpetAreaRule, args: &QuoteArgs) -> Result<ExitCode> {
    let variant = db
        .variants()
        .get_by_sku(&args.variant)
        .await
        .with_context(|| format!("unknown variant '{}'", args.variant))?;
    let book = db
        .prices()
        .load_price_book(&variant.id)
        .await
        .with_context(|| format!("failed to load prices for '{}'", variant.sku))?;

    let outcome = price(rule, &variant.id, &book, args.selection.to_selection())?;
    if let QuoteOutcome::Priced { quote } = &outcome {
        info!(sku = %variant.sku, total = %quote.total, "Quote computed");
    }

    print_json(&outcome)?;
    Ok(match outcome {
        QuoteOutcome::Priced { .. } => ExitCode::SUCCESS,
        QuoteOutcome::Invalid { .. } => ExitCode::FAILURE,
    })
}

/// Prices a selection, turning an invalid selection into its display form.
///
/// Missing prices are errors, not outcomes.
pub fn price(
    rule: &CarpetAreaRule,
    variant: &VariantId,
    prices: &dyn PriceLookup,
    mut selection: OptionSelection,
) -> Result<QuoteOutcome> {
    match rule.quote(&selection, variant, prices) {
        Ok(quote) => Ok(QuoteOutcome::Priced { quote }),
        Err(RuleError::Invalid(reason)) => {
            let total = rule.compute_with_feedback(&mut selection, variant, prices)?;
            Ok(QuoteOutcome::Invalid {
                reason: reason.to_string(),
                total,
                selection,
            })
        }
        Err(RuleError::Lookup(err)) => {
            Err(err).with_context(|| format!("cannot price variant {}", variant))
        }
    }
}
