//! Public read access to site settings.
//!
//! Settings are key -> JSONB rows; keys under `site.` are exposed to the
//! public API (hero copy, opening hours, contact details).

use serde_json::Value as JsonValue;
use sqlx::PgPool;

use super::RepositoryError;

/// Well-known setting keys.
pub mod keys {
    /// Hero headline and sub-copy shown on the home page.
    pub const SITE_HERO: &str = "site.hero";
    /// Gallery contact block (address, phone, hours).
    pub const SITE_CONTACT: &str = "site.contact";
}

/// Repository for the public side of site settings.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get one setting value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<JsonValue>, RepositoryError> {
        let value: Option<JsonValue> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = $1")
                .bind(key)
                .fetch_optional(self.pool)
                .await?;

        Ok(value)
    }

    /// All public (`site.`-prefixed) settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_public(&self) -> Result<Vec<(String, JsonValue)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            key: String,
            value: JsonValue,
        }

        let rows: Vec<Row> =
            sqlx::query_as("SELECT key, value FROM settings WHERE key LIKE 'site.%' ORDER BY key")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(|r| (r.key, r.value)).collect())
    }
}
