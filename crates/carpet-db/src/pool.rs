//! # Database Handle
//!
//! Opens the carpet pricing database and hands out repositories.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Opening the Price Database                         │
//! │                                                                         │
//! │  carpet-quote --database shop.db        seed --db carpet_dev.db        │
//! │       │                                      │                          │
//! │       └──────────────┬───────────────────────┘                          │
//! │                      ▼                                                  │
//! │  DbConfig::new(path)  /  DbConfig::in_memory()  (tests)                │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  Database::new ── file created if missing, WAL, foreign keys on        │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  001_initial_schema.sql applied (variants, prices, options)            │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  variants()  prices()  options()                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Foreign keys must be on: the price table relies on them to refuse prices
//! for unknown variants and categories other than glattschnitt / raummass.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::option::OptionRepository;
use crate::repository::price::PriceRepository;
use crate::repository::variant::VariantRepository;

/// Path that selects a private in-memory database.
const IN_MEMORY: &str = ":memory:";

/// Pool size for file databases. Quotes only read, the seed writes serially.
const FILE_POOL_SIZE: u32 = 4;

// =============================================================================
// Configuration
// =============================================================================

/// Where the price database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// SQLite file, created on first open.
    pub database_path: PathBuf,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
        }
    }

    /// A throwaway database that lives as long as the pool.
    ///
    /// Limited to a single connection, since every new SQLite connection to
    /// `:memory:` would see an empty database.
    pub fn in_memory() -> Self {
        DbConfig::new(IN_MEMORY)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
        };

        Ok(options
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true))
    }

    fn pool_size(&self) -> u32 {
        if self.is_in_memory() {
            1
        } else {
            FILE_POOL_SIZE
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Open price database with its schema applied.
///
/// Cloning is cheap; clones share the pool.
///
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("carpet.db")).await?;
/// let variant = db.variants().get_by_sku("BERBER-400").await?;
/// let prices = db.prices().load_price_book(&variant.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (creating if needed) the database and applies pending migrations.
    ///
    /// ## Returns
    /// * `Err(DbError::ConnectionFailed)` - The file could not be opened
    /// * `Err(DbError::MigrationFailed)` - The schema could not be applied
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening price database");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size())
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        migrations::run_migrations(&pool).await?;

        Ok(Database { pool })
    }

    /// Underlying pool, for queries no repository covers.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn variants(&self) -> VariantRepository {
        VariantRepository::new(self.pool.clone())
    }

    /// Prices per (variant, currency, category), and
    /// [`PriceBook`](carpet_core::PriceBook) snapshots for the rule.
    pub fn prices(&self) -> PriceRepository {
        PriceRepository::new(self.pool.clone())
    }

    /// Option types and their described values.
    pub fn options(&self) -> OptionRepository {
        OptionRepository::new(self.pool.clone())
    }

    /// Waits for open connections to finish and closes the pool. Repository
    /// calls fail afterwards.
    pub async fn close(&self) {
        info!("Closing price database");
        self.pool.close().await;
    }

    /// `true` when the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
