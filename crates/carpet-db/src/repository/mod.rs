//! # Repository Module
//!
//! Database repository implementations for carpet pricing.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  carpet-quote command                                                  │
//! │       │                                                                 │
//! │       │  db.prices().load_price_book(&variant.id)                      │
//! │       ▼                                                                 │
//! │  VariantRepository      PriceRepository        OptionRepository        │
//! │  ├── insert             ├── upsert_price       ├── create_option_type  │
//! │  ├── get_by_sku         ├── amount_in          ├── add_value           │
//! │  └── list               └── load_price_book    ├── set_description     │
//! │                                                └── list_values         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`VariantRepository`](variant::VariantRepository) - Priced carpet variants
//! - [`PriceRepository`](price::PriceRepository) - Per-category prices, PriceBook snapshots
//! - [`OptionRepository`](option::OptionRepository) - Option types and described values

pub mod option;
pub mod price;
pub mod variant;

use chrono::{DateTime, Utc};

use crate::error::{DbError, DbResult};

/// Parses an RFC 3339 timestamp column.
pub(crate) fn parse_timestamp(value: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::Internal(format!("invalid timestamp '{}': {}", value, e)))
}
