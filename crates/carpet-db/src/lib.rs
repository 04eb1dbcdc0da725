//! # carpet-db: Database Layer for Carpet Pricing
//!
//! SQLite storage for variants, their per-category prices, and the option
//! values offered to customers. Uses sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Data Flow                                  │
//! │                                                                         │
//! │  carpet-quote quote --variant BERBER-400 ...                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     carpet-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ VariantRepo   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ PriceRepo     │    │ 001_init.sql │  │   │
//! │  │   │               │    │ OptionRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼  PriceBook snapshot                                             │
//! │  carpet-core CarpetAreaRule::quote (synchronous, no I/O)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Variant, price and option repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carpet_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("carpet.db")).await?;
//! let variant = db.variants().get_by_sku("BERBER-400").await?;
//! let book = db.prices().load_price_book(&variant.id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::option::OptionRepository;
pub use repository::price::PriceRepository;
pub use repository::variant::VariantRepository;
