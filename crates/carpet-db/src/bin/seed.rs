//! # Seed Data Generator
//!
//! Populates the database with demo carpet variants, their prices, and the
//! option types the carpet area rule reads.
//!
//! ## Usage
//! ```bash
//! cargo run -p carpet-db --bin seed
//!
//! # Specify database path
//! cargo run -p carpet-db --bin seed -- --db ./data/carpet.db
//! ```
//!
//! ## Generated Data
//! - Variants with EUR prices in both categories (glattschnitt, raummass)
//! - Option types Width, Height, Type, Overedging
//! - Described values for Type and Overedging, standard widths for Width

use clap::Parser;
use rust_decimal::Decimal;
use std::str::FromStr;

use carpet_core::{Currency, CutType, Money, OptionDefinition, OptionName};
use carpet_db::{Database, DbConfig};

/// (sku, name, glattschnitt base price, raummass price per m²)
const VARIANTS: &[(&str, &str, &str, &str)] = &[
    ("BERBER-400", "Berber Anthrazit", "10.00", "14.90"),
    ("VELOURS-500", "Velours Sand", "19.90", "24.50"),
    ("SISAL-400", "Sisal Natur", "15.00", "21.95"),
];

/// (option type, value name, presentation, description)
const OPTION_VALUES: &[(OptionName, &str, &str, Option<&str>)] = &[
    (OptionName::Width, "4", "4 m", None),
    (OptionName::Width, "5", "5 m", None),
    (
        OptionName::Type,
        "glattschnitt",
        "Glattschnitt",
        Some("Zuschnitt in Rollenbreite, nur Standardbreiten"),
    ),
    (
        OptionName::Type,
        "raummass",
        "Raummaß",
        Some("Zuschnitt auf beliebige Breite innerhalb der Grenzen"),
    ),
    (
        OptionName::Overedging,
        "1",
        "Mit Kettelung",
        Some("Ringsum gekettelte Kanten, Preis pro laufendem Meter. Ohne Kettelung die Option nicht mitsenden."),
    ),
];

/// Carpet pricing seed data generator
#[derive(Debug, Parser)]
#[command(name = "seed")]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = "./carpet_dev.db")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("🌱 Carpet Pricing Seed Data Generator");
    println!("=====================================");
    println!("Database: {}", args.db);
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if !db.variants().list().await?.is_empty() {
        println!("⚠ Database already has variants");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating variants...");

    let eur = Currency::eur();
    for (sku, name, base, unit) in VARIANTS {
        let variant = db.variants().insert(sku, name).await?;

        let base = Money::new(Decimal::from_str(base)?);
        let unit = Money::new(Decimal::from_str(unit)?);
        db.prices()
            .upsert_price(&variant.id, &eur, CutType::StandardCut, base)
            .await?;
        db.prices()
            .upsert_price(&variant.id, &eur, CutType::CustomCut, unit)
            .await?;

        println!("  {} {} (base {} / m² {})", sku, name, base, unit);
    }

    println!();
    println!("Generating option types...");

    for option in OptionName::ALL {
        db.options()
            .create_option_type(&OptionDefinition::from(option))
            .await?;
    }

    for (option, name, presentation, description) in OPTION_VALUES {
        db.options()
            .add_value(option.as_str(), name, presentation, *description)
            .await?;
    }

    println!("  {} option types, {} values", OptionName::ALL.len(), OPTION_VALUES.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
