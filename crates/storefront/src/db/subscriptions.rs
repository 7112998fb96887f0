//! Artwork rental subscription requests and history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use maru_core::{ArtworkId, SubscriptionId, SubscriptionStatus, UserId};

use super::RepositoryError;
use crate::models::artwork::ArtworkSummary;

/// A rental subscription as seen by its owner (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub artwork_id: ArtworkId,
    pub artwork_title: String,
    pub artwork_cover: Option<String>,
    pub status: SubscriptionStatus,
    pub monthly_price: Decimal,
    pub monthly_price_display: String,
    pub started_at: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: i32,
    artwork_id: i32,
    artwork_title: String,
    artwork_images: Vec<String>,
    status: SubscriptionStatus,
    monthly_price: Decimal,
    started_at: Option<DateTime<Utc>>,
    current_period_end: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            id: SubscriptionId::new(row.id),
            artwork_id: ArtworkId::new(row.artwork_id),
            artwork_title: row.artwork_title,
            artwork_cover: row.artwork_images.first().cloned(),
            status: row.status,
            monthly_price: row.monthly_price,
            monthly_price_display: ArtworkSummary::format_price(row.monthly_price),
            started_at: row.started_at,
            current_period_end: row.current_period_end,
            created_at: row.created_at,
        }
    }
}

/// Repository for customer-side subscription operations.
pub struct SubscriptionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubscriptionRepository<'a> {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Request a rental for an artwork.
    ///
    /// The monthly price snapshots the artwork's rental price; the request
    /// stays in `requested` until gallery staff activate it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the artwork has no rental
    /// price. Returns `RepositoryError::NotFound` if the artwork is missing
    /// or not approved.
    pub async fn create_request(
        &self,
        user_id: UserId,
        artwork_id: ArtworkId,
    ) -> Result<Subscription, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct RentalRow {
            rental_price: Option<Decimal>,
        }

        let rental: Option<RentalRow> = sqlx::query_as(
            "SELECT rental_price FROM artworks WHERE id = $1 AND status = 'approved'",
        )
        .bind(artwork_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        let Some(rental) = rental else {
            return Err(RepositoryError::NotFound);
        };
        let Some(monthly_price) = rental.rental_price else {
            return Err(RepositoryError::Conflict(
                "artwork is not available for rental".to_owned(),
            ));
        };

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO subscriptions (user_id, artwork_id, monthly_price) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id.as_i32())
        .bind(artwork_id.as_i32())
        .bind(monthly_price)
        .fetch_one(self.pool)
        .await?;

        self.get_for_user(SubscriptionId::new(id), user_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// One subscription, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_user(
        &self,
        id: SubscriptionId,
        user_id: UserId,
    ) -> Result<Option<Subscription>, RepositoryError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            "SELECT s.id, s.artwork_id, a.title AS artwork_title, a.images AS artwork_images, \
                    s.status, s.monthly_price, s.started_at, s.current_period_end, s.created_at \
             FROM subscriptions s \
             JOIN artworks a ON a.id = s.artwork_id \
             WHERE s.id = $1 AND s.user_id = $2",
        )
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Subscription::from))
    }

    /// Subscription history for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(
            "SELECT s.id, s.artwork_id, a.title AS artwork_title, a.images AS artwork_images, \
                    s.status, s.monthly_price, s.started_at, s.current_period_end, s.created_at \
             FROM subscriptions s \
             JOIN artworks a ON a.id = s.artwork_id \
             WHERE s.user_id = $1 \
             ORDER BY s.created_at DESC, s.id DESC",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Subscription::from).collect())
    }
}
