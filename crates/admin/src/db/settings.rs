//! Settings database operations.
//!
//! The settings table is a key -> JSONB store; the well-known keys together
//! form the singleton site configuration document.

use serde_json::Value as JsonValue;
use sqlx::PgPool;

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Repository for site settings.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a setting value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get(&self, key: &str) -> Result<Option<JsonValue>, SettingsError> {
        let result: Option<JsonValue> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(self.pool)
                .await?;

        Ok(result)
    }

    /// Set a setting value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn set(&self, key: &str, value: &JsonValue) -> Result<(), SettingsError> {
        sqlx::query(
            "INSERT INTO settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete a setting.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, key: &str) -> Result<(), SettingsError> {
        sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// All settings, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_all(&self) -> Result<Vec<(String, JsonValue)>, SettingsError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            key: String,
            value: JsonValue,
        }

        let rows: Vec<Row> = sqlx::query_as("SELECT key, value FROM settings ORDER BY key")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| (r.key, r.value)).collect())
    }
}
