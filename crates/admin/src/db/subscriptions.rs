//! Subscription (rental) management repository.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use maru_core::{ArtworkId, SubscriptionId, SubscriptionStatus, UserId};

use super::RepositoryError;

/// A subscription as seen by staff.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSubscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub user_email: String,
    pub artwork_id: ArtworkId,
    pub artwork_title: String,
    pub status: SubscriptionStatus,
    pub monthly_price: Decimal,
    pub started_at: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct Row {
    id: i32,
    user_id: i32,
    user_email: String,
    artwork_id: i32,
    artwork_title: String,
    status: SubscriptionStatus,
    monthly_price: Decimal,
    started_at: Option<DateTime<Utc>>,
    current_period_end: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<Row> for AdminSubscription {
    fn from(row: Row) -> Self {
        Self {
            id: SubscriptionId::new(row.id),
            user_id: UserId::new(row.user_id),
            user_email: row.user_email,
            artwork_id: ArtworkId::new(row.artwork_id),
            artwork_title: row.artwork_title,
            status: row.status,
            monthly_price: row.monthly_price,
            started_at: row.started_at,
            current_period_end: row.current_period_end,
            created_at: row.created_at,
        }
    }
}

const SUBSCRIPTION_SELECT: &str = "SELECT s.id, s.user_id, u.email AS user_email, \
     s.artwork_id, a.title AS artwork_title, s.status, s.monthly_price, \
     s.started_at, s.current_period_end, s.created_at \
     FROM subscriptions s \
     JOIN users u ON u.id = s.user_id \
     JOIN artworks a ON a.id = s.artwork_id";

/// Repository for subscription management.
pub struct SubscriptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriptionRepository<'a> {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List subscriptions, optionally by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        status: Option<SubscriptionStatus>,
    ) -> Result<Vec<AdminSubscription>, RepositoryError> {
        let rows: Vec<Row> = if let Some(status) = status {
            sqlx::query_as(&format!(
                "{SUBSCRIPTION_SELECT} WHERE s.status = $1 \
                 ORDER BY s.created_at DESC, s.id DESC"
            ))
            .bind(status)
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as(&format!(
                "{SUBSCRIPTION_SELECT} ORDER BY s.created_at DESC, s.id DESC"
            ))
            .fetch_all(self.pool)
            .await?
        };

        Ok(rows.into_iter().map(AdminSubscription::from).collect())
    }

    /// Get one subscription.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        id: SubscriptionId,
    ) -> Result<Option<AdminSubscription>, RepositoryError> {
        let row: Option<Row> = sqlx::query_as(&format!("{SUBSCRIPTION_SELECT} WHERE s.id = $1"))
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(AdminSubscription::from))
    }

    /// Activate a rental: status `active`, billing period starts now.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the subscription doesn't exist.
    pub async fn activate(&self, id: SubscriptionId) -> Result<AdminSubscription, RepositoryError> {
        let result = sqlx::query(
            "UPDATE subscriptions \
             SET status = 'active', \
                 started_at = COALESCE(started_at, NOW()), \
                 current_period_end = NOW() + INTERVAL '1 month', \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Advance the billing period by one month.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the subscription doesn't exist.
    pub async fn renew(&self, id: SubscriptionId) -> Result<AdminSubscription, RepositoryError> {
        let result = sqlx::query(
            "UPDATE subscriptions \
             SET current_period_end = COALESCE(current_period_end, NOW()) + INTERVAL '1 month', \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Set a subscription's status (pause / cancel / expire).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the subscription doesn't exist.
    pub async fn set_status(
        &self,
        id: SubscriptionId,
        status: SubscriptionStatus,
    ) -> Result<AdminSubscription, RepositoryError> {
        let result =
            sqlx::query("UPDATE subscriptions SET status = $1, updated_at = NOW() WHERE id = $2")
                .bind(status)
                .bind(id.as_i32())
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.get(id).await?.ok_or(RepositoryError::NotFound)
    }

    /// Dashboard count of active rentals.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn active_count(&self) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE status = 'active'")
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
