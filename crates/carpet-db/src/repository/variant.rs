//! # Variant Repository
//!
//! Database operations for priced carpet variants.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::parse_timestamp;
use crate::error::{DbError, DbResult};
use carpet_core::{Variant, VariantId};

#[derive(Debug, FromRow)]
struct VariantRow {
    id: String,
    sku: String,
    name: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<VariantRow> for Variant {
    type Error = DbError;

    fn try_from(row: VariantRow) -> DbResult<Self> {
        Ok(Variant {
            id: VariantId::new(row.id),
            sku: row.sku,
            name: row.name,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Repository for variant database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = VariantRepository::new(pool);
/// let variant = repo.insert("BERBER-400", "Berber Anthrazit 400").await?;
/// let same = repo.get_by_sku("BERBER-400").await?;
/// ```
#[derive(Debug, Clone)]
pub struct VariantRepository {
    pool: SqlitePool,
}

impl VariantRepository {
    /// Creates a new VariantRepository.
    pub fn new(pool: SqlitePool) -> Self {
        VariantRepository { pool }
    }

    /// Inserts a new variant with a generated id.
    ///
    /// ## Returns
    /// * `Ok(Variant)` - The stored variant
    /// * `Err(DbError::UniqueViolation)` - SKU already exists
    pub async fn insert(&self, sku: &str, name: &str) -> DbResult<Variant> {
        let sku = sku.trim();
        debug!(sku = %sku, "Inserting variant");

        let now = Utc::now();
        let variant = Variant {
            id: VariantId::new(Uuid::new_v4().to_string()),
            sku: sku.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO variants (id, sku, name, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(variant.id.as_str())
        .bind(&variant.sku)
        .bind(&variant.name)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: variant.sku.clone(),
            },
            other => other,
        })?;

        Ok(variant)
    }

    /// Gets a variant by its SKU.
    ///
    /// ## Returns
    /// * `Ok(Variant)` - Variant found
    /// * `Err(DbError::NotFound)` - No variant with that SKU
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Variant> {
        let sku = sku.trim();

        let row = sqlx::query_as::<_, VariantRow>(
            r#"
            SELECT id, sku, name, created_at, updated_at
            FROM variants
            WHERE sku = ?1
            "#,
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("Variant", sku))?;

        row.try_into()
    }

    /// Lists all variants ordered by SKU.
    pub async fn list(&self) -> DbResult<Vec<Variant>> {
        let rows = sqlx::query_as::<_, VariantRow>(
            r#"
            SELECT id, sku, name, created_at, updated_at
            FROM variants
            ORDER BY sku
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Variant::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};

    #[tokio::test]
    async fn test_insert_and_get_by_sku() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let inserted = db.variants().insert("BERBER-400", "Berber 400").await.unwrap();
        let loaded = db.variants().get_by_sku(" BERBER-400 ").await.unwrap();

        assert_eq!(loaded.id, inserted.id);
        assert_eq!(loaded.name, "Berber 400");
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.variants().insert("BERBER-400", "Berber 400").await.unwrap();

        let err = db.variants().insert("BERBER-400", "Again").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "BERBER-400"));
    }

    #[tokio::test]
    async fn test_unknown_sku_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.variants().get_by_sku("NOPE").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
