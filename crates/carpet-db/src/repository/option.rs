//! # Option Repository
//!
//! Option types (Width, Height, Type, Overedging) and their values. Values
//! carry an optional description shown to the customer next to the choice,
//! e.g. what "raummass" means for the cut.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::parse_timestamp;
use crate::error::{DbError, DbResult};
use carpet_core::{OptionDefinition, OptionValue};

#[derive(Debug, FromRow)]
struct OptionValueRow {
    id: String,
    option_type: String,
    name: String,
    presentation: String,
    description: Option<String>,
    position: i64,
    updated_at: String,
}

impl TryFrom<OptionValueRow> for OptionValue {
    type Error = DbError;

    fn try_from(row: OptionValueRow) -> DbResult<Self> {
        Ok(OptionValue {
            id: row.id,
            option_type: row.option_type,
            name: row.name,
            presentation: row.presentation,
            description: row.description,
            position: row.position,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Repository for option types and option values.
#[derive(Debug, Clone)]
pub struct OptionRepository {
    pool: SqlitePool,
}

impl OptionRepository {
    /// Creates a new OptionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OptionRepository { pool }
    }

    /// Creates an option type and returns its id.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - An option type with that name exists
    pub async fn create_option_type(&self, definition: &OptionDefinition) -> DbResult<String> {
        debug!(name = %definition.name, "Creating option type");

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            r#"
            INSERT INTO option_types (id, name, presentation, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&id)
        .bind(&definition.name)
        .bind(&definition.presentation)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    /// Returns the id of an option type by name, if it exists.
    pub async fn option_type_id(&self, name: &str) -> DbResult<Option<String>> {
        let id = sqlx::query_scalar("SELECT id FROM option_types WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    /// Lists all option type names in creation order.
    pub async fn list_types(&self) -> DbResult<Vec<String>> {
        let names = sqlx::query_scalar("SELECT name FROM option_types ORDER BY created_at, name")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    /// Adds a value to an option type. The value is appended after the
    /// existing ones.
    ///
    /// ## Returns
    /// * `Ok(OptionValue)` - The stored value
    /// * `Err(DbError::NotFound)` - Unknown option type
    /// * `Err(DbError::UniqueViolation)` - Value name already used for this type
    pub async fn add_value(
        &self,
        option_type: &str,
        name: &str,
        presentation: &str,
        description: Option<&str>,
    ) -> DbResult<OptionValue> {
        let type_id = self
            .option_type_id(option_type)
            .await?
            .ok_or_else(|| DbError::not_found("Option type", option_type))?;

        debug!(option_type = %option_type, name = %name, "Adding option value");

        let position: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM option_values WHERE option_type_id = ?1",
        )
        .bind(&type_id)
        .fetch_one(&self.pool)
        .await?;

        let now = Utc::now();
        let value = OptionValue {
            id: Uuid::new_v4().to_string(),
            option_type: option_type.to_string(),
            name: name.to_string(),
            presentation: presentation.to_string(),
            description: description.map(str::to_string),
            position,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO option_values (
                id, option_type_id, name, presentation, description,
                position, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&value.id)
        .bind(&type_id)
        .bind(&value.name)
        .bind(&value.presentation)
        .bind(&value.description)
        .bind(value.position)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                field,
                value: value.name.clone(),
            },
            other => other,
        })?;

        Ok(value)
    }

    /// Sets or clears the description of an option value.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No value with that id
    pub async fn set_description(&self, value_id: &str, description: Option<&str>) -> DbResult<()> {
        debug!(id = %value_id, "Updating option value description");

        let result = sqlx::query(
            r#"
            UPDATE option_values
            SET description = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(value_id)
        .bind(description)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Option value", value_id));
        }

        Ok(())
    }

    /// Lists the values of an option type ordered by position.
    ///
    /// An unknown option type yields an empty list.
    pub async fn list_values(&self, option_type: &str) -> DbResult<Vec<OptionValue>> {
        let rows = sqlx::query_as::<_, OptionValueRow>(
            r#"
            SELECT
                v.id,
                t.name AS option_type,
                v.name,
                v.presentation,
                v.description,
                v.position,
                v.updated_at
            FROM option_values v
            INNER JOIN option_types t ON t.id = v.option_type_id
            WHERE t.name = ?1
            ORDER BY v.position, v.name
            "#,
        )
        .bind(option_type)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(OptionValue::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use carpet_core::{OptionDefinition, OptionName};

    use crate::{Database, DbConfig, DbError};

    async fn with_type_option() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.options()
            .create_option_type(&OptionDefinition::from(OptionName::Type))
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn test_values_listed_in_insertion_order() {
        let db = with_type_option().await;
        let options = db.options();

        options
            .add_value("Type", "raummass", "Raummaß", Some("Cut to any width"))
            .await
            .unwrap();
        options
            .add_value("Type", "glattschnitt", "Glattschnitt", None)
            .await
            .unwrap();

        let values = options.list_values("Type").await.unwrap();
        let names: Vec<_> = values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["raummass", "glattschnitt"]);
        assert_eq!(values[0].position, 0);
        assert_eq!(values[1].position, 1);
        assert_eq!(values[0].description.as_deref(), Some("Cut to any width"));
    }

    #[tokio::test]
    async fn test_set_description() {
        let db = with_type_option().await;
        let options = db.options();
        let value = options
            .add_value("Type", "glattschnitt", "Glattschnitt", None)
            .await
            .unwrap();

        options
            .set_description(&value.id, Some("Standard roll width"))
            .await
            .unwrap();
        let values = options.list_values("Type").await.unwrap();
        assert_eq!(values[0].description.as_deref(), Some("Standard roll width"));

        options.set_description(&value.id, None).await.unwrap();
        let values = options.list_values("Type").await.unwrap();
        assert_eq!(values[0].description, None);
    }

    #[tokio::test]
    async fn test_set_description_unknown_value() {
        let db = with_type_option().await;
        let err = db.options().set_description("missing", Some("x")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_add_value_to_unknown_type() {
        let db = with_type_option().await;
        let err = db
            .options()
            .add_value("Colour", "red", "Red", None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_duplicate_value_rejected() {
        let db = with_type_option().await;
        let options = db.options();
        options.add_value("Type", "raummass", "Raummaß", None).await.unwrap();

        let err = options
            .add_value("Type", "raummass", "Raummaß", None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}
