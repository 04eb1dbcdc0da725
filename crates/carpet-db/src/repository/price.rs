//! # Price Repository
//!
//! Stores one amount per (variant, currency, price category) and hands the
//! pricing rule an in-memory [`PriceBook`] snapshot.
//!
//! ## Price Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  category        used by the carpet area rule as                       │
//! │  ────────────    ───────────────────────────────────────────────────   │
//! │  glattschnitt    base price (subtracted once from the area price)      │
//! │  raummass        unit price per m² of priced area                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rule itself is synchronous, so quoting loads the whole book for one
//! variant up front instead of querying per category.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;
use tracing::debug;

use crate::error::{DbError, DbResult};
use carpet_core::{Currency, CutType, Money, PriceBook, VariantId};

#[derive(Debug, FromRow)]
struct PriceRow {
    currency: String,
    category: CutType,
    amount: String,
}

fn parse_amount(value: &str) -> DbResult<Money> {
    Decimal::from_str(value)
        .map(Money::new)
        .map_err(|e| DbError::InvalidAmount {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Repository for variant prices.
#[derive(Debug, Clone)]
pub struct PriceRepository {
    pool: SqlitePool,
}

impl PriceRepository {
    /// Creates a new PriceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PriceRepository { pool }
    }

    /// Inserts or replaces the price of a variant in one category.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown variant
    pub async fn upsert_price(
        &self,
        variant: &VariantId,
        currency: &Currency,
        category: CutType,
        amount: Money,
    ) -> DbResult<()> {
        debug!(
            variant = %variant,
            currency = %currency,
            category = %category,
            amount = %amount.amount(),
            "Upserting price"
        );

        sqlx::query(
            r#"
            INSERT INTO prices (variant_id, currency, category, amount, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (variant_id, currency, category)
            DO UPDATE SET amount = excluded.amount, updated_at = excluded.updated_at
            "#,
        )
        .bind(variant.as_str())
        .bind(currency.as_str())
        .bind(category)
        .bind(amount.amount().to_string())
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a single stored price.
    ///
    /// ## Returns
    /// * `Ok(Money)` - Stored amount
    /// * `Err(DbError::NotFound)` - No price for that combination
    pub async fn amount_in(
        &self,
        variant: &VariantId,
        currency: &Currency,
        category: CutType,
    ) -> DbResult<Money> {
        let amount: Option<String> = sqlx::query_scalar(
            r#"
            SELECT amount FROM prices
            WHERE variant_id = ?1 AND currency = ?2 AND category = ?3
            "#,
        )
        .bind(variant.as_str())
        .bind(currency.as_str())
        .bind(category)
        .fetch_optional(&self.pool)
        .await?;

        match amount {
            Some(value) => parse_amount(&value),
            None => Err(DbError::not_found(
                "Price",
                format!("{}/{}/{}", variant, currency, category),
            )),
        }
    }

    /// Loads every price stored for a variant into a [`PriceBook`].
    ///
    /// An unknown variant yields an empty book; the rule then reports the
    /// missing price as a lookup failure.
    pub async fn load_price_book(&self, variant: &VariantId) -> DbResult<PriceBook> {
        let rows = sqlx::query_as::<_, PriceRow>(
            r#"
            SELECT currency, category, amount
            FROM prices
            WHERE variant_id = ?1
            "#,
        )
        .bind(variant.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut book = PriceBook::new();
        for row in rows {
            let amount = parse_amount(&row.amount)?;
            book.insert(variant.clone(), Currency::new(&row.currency), row.category, amount);
        }

        debug!(variant = %variant, prices = book.len(), "Loaded price book");
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use carpet_core::{Currency, CutType, Money, PriceLookup, VariantId};
    use rust_decimal_macros::dec;

    use crate::{Database, DbConfig, DbError};

    async fn seeded() -> (Database, VariantId) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let variant = db.variants().insert("BERBER-400", "Berber 400").await.unwrap();
        (db, variant.id)
    }

    #[tokio::test]
    async fn test_upsert_replaces_amount() {
        let (db, variant) = seeded().await;
        let eur = Currency::eur();
        let prices = db.prices();

        prices
            .upsert_price(&variant, &eur, CutType::CustomCut, Money::new(dec!(12.50)))
            .await
            .unwrap();
        prices
            .upsert_price(&variant, &eur, CutType::CustomCut, Money::new(dec!(13.95)))
            .await
            .unwrap();

        let amount = prices.amount_in(&variant, &eur, CutType::CustomCut).await.unwrap();
        assert_eq!(amount, Money::new(dec!(13.95)));
    }

    #[tokio::test]
    async fn test_missing_price_is_not_found() {
        let (db, variant) = seeded().await;
        let err = db
            .prices()
            .amount_in(&variant, &Currency::eur(), CutType::StandardCut)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_price_for_unknown_variant_rejected() {
        let (db, _) = seeded().await;
        let err = db
            .prices()
            .upsert_price(
                &VariantId::from("ghost"),
                &Currency::eur(),
                CutType::StandardCut,
                Money::new(dec!(1)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_load_price_book_feeds_lookup() {
        let (db, variant) = seeded().await;
        let eur = Currency::eur();
        let prices = db.prices();
        prices
            .upsert_price(&variant, &eur, CutType::StandardCut, Money::new(dec!(10)))
            .await
            .unwrap();
        prices
            .upsert_price(&variant, &eur, CutType::CustomCut, Money::new(dec!(14.90)))
            .await
            .unwrap();

        let book = prices.load_price_book(&variant).await.unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(
            book.amount_in(&variant, &eur, CutType::CustomCut).unwrap(),
            Money::new(dec!(14.90))
        );
        assert!(book
            .amount_in(&variant, &Currency::new("usd"), CutType::CustomCut)
            .is_err());
    }
}
