//! Customer wishlist operations.

use sqlx::PgPool;

use maru_core::{ArtworkId, UserId};

use super::RepositoryError;
use super::artworks::ArtworkSummaryRow;
use crate::models::artwork::ArtworkSummary;

/// Repository for wishlist membership.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Toggle an artwork in a user's wishlist.
    ///
    /// Returns `true` when the artwork is now wishlisted, `false` when the
    /// toggle removed it. Toggling twice restores the original membership.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn toggle(
        &self,
        user_id: UserId,
        artwork_id: ArtworkId,
    ) -> Result<bool, RepositoryError> {
        let removed = sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND artwork_id = $2")
            .bind(user_id.as_i32())
            .bind(artwork_id.as_i32())
            .execute(self.pool)
            .await?
            .rows_affected();

        if removed > 0 {
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO wishlists (user_id, artwork_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(user_id.as_i32())
        .bind(artwork_id.as_i32())
        .execute(self.pool)
        .await?;

        Ok(true)
    }

    /// All wishlisted artworks for a user, newest addition first.
    ///
    /// Only approved artworks are returned; entries pointing at artworks
    /// that have since been taken down are silently skipped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<ArtworkSummary>, RepositoryError> {
        let rows: Vec<ArtworkSummaryRow> = sqlx::query_as(
            "SELECT a.id, a.title, a.artist_name, a.images, a.price, a.rental_price, \
                    a.category, a.season, a.space, a.width_cm, a.height_cm, a.sold, a.created_at \
             FROM wishlists w \
             JOIN artworks a ON a.id = w.artwork_id \
             WHERE w.user_id = $1 AND a.status = 'approved' \
             ORDER BY w.created_at DESC",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ArtworkSummary::from).collect())
    }

    /// Whether an artwork is in the user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn contains(
        &self,
        user_id: UserId,
        artwork_id: ArtworkId,
    ) -> Result<bool, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM wishlists WHERE user_id = $1 AND artwork_id = $2",
        )
        .bind(user_id.as_i32())
        .bind(artwork_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }
}
