//! Artwork management repository: CRUD, moderation, curation flags.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use maru_core::{
    ApprovalStatus, ArtworkId, Category, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageCursor, Season,
    SpaceTag, UserId,
};

use super::RepositoryError;
use crate::models::artwork::{Artwork, ArtworkAdminFilter, ArtworkAdminPage, ArtworkInput};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for artwork queries.
#[derive(Debug, sqlx::FromRow)]
struct ArtworkRow {
    id: i32,
    owner_id: i32,
    title: String,
    artist_name: String,
    description: String,
    images: Vec<String>,
    price: Decimal,
    rental_price: Option<Decimal>,
    category: Category,
    season: Option<Season>,
    space: Option<SpaceTag>,
    width_cm: Decimal,
    height_cm: Decimal,
    status: ApprovalStatus,
    featured: bool,
    featured_rank: Option<i32>,
    curated: bool,
    sold: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ArtworkRow> for Artwork {
    fn from(row: ArtworkRow) -> Self {
        Self {
            id: ArtworkId::new(row.id),
            owner_id: UserId::new(row.owner_id),
            title: row.title,
            artist_name: row.artist_name,
            description: row.description,
            images: row.images,
            price: row.price,
            rental_price: row.rental_price,
            category: row.category,
            season: row.season,
            space: row.space,
            width_cm: row.width_cm,
            height_cm: row.height_cm,
            status: row.status,
            featured: row.featured,
            featured_rank: row.featured_rank,
            curated: row.curated,
            sold: row.sold,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const ARTWORK_COLUMNS: &str = "id, owner_id, title, artist_name, description, images, price, \
     rental_price, category, season, space, width_cm, height_cm, status, \
     featured, featured_rank, curated, sold, created_at, updated_at";

/// Build the management listing SELECT.
fn build_admin_listing_query(
    filter: &ArtworkAdminFilter,
    cursor: Option<PageCursor>,
    fetch: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {ARTWORK_COLUMNS} FROM artworks WHERE TRUE"
    ));

    if let Some(status) = filter.status {
        qb.push(" AND status = ");
        qb.push_bind(status);
    }
    if let Some(category) = filter.category {
        qb.push(" AND category = ");
        qb.push_bind(category);
    }
    if let Some(owner_id) = filter.owner_id {
        qb.push(" AND owner_id = ");
        qb.push_bind(owner_id.as_i32());
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search.replace('%', "\\%").replace('_', "\\_"));
        qb.push(" AND (title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR artist_name ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    if let Some(cursor) = cursor {
        qb.push(" AND (created_at, id) < (");
        qb.push_bind(cursor.created_at);
        qb.push(", ");
        qb.push_bind(cursor.id);
        qb.push(")");
    }

    qb.push(" ORDER BY created_at DESC, id DESC LIMIT ");
    qb.push_bind(fetch);
    qb
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for artwork management.
pub struct ArtworkRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtworkRepository<'a> {
    /// Create a new artwork repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Management listing with filters and cursor pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: &ArtworkAdminFilter,
        cursor: Option<PageCursor>,
        limit: Option<i64>,
    ) -> Result<ArtworkAdminPage, RepositoryError> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let mut qb = build_admin_listing_query(filter, cursor, limit + 1);

        let rows: Vec<ArtworkRow> = qb.build_query_as().fetch_all(self.pool).await?;
        let mut artworks: Vec<Artwork> = rows.into_iter().map(Artwork::from).collect();

        #[allow(clippy::cast_sign_loss)] // limit is clamped to [1, MAX_PAGE_SIZE]
        let limit = limit as usize;
        let has_more = artworks.len() > limit;
        artworks.truncate(limit);
        let next_cursor = artworks
            .last()
            .map(|a| PageCursor::new(a.created_at, a.id.as_i32()).encode());

        Ok(ArtworkAdminPage {
            artworks,
            next_cursor,
            has_more,
        })
    }

    /// Get one artwork.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ArtworkId) -> Result<Option<Artwork>, RepositoryError> {
        let row: Option<ArtworkRow> =
            sqlx::query_as(&format!("SELECT {ARTWORK_COLUMNS} FROM artworks WHERE id = $1"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Artwork::from))
    }

    /// Create an artwork (enters moderation as `pending`).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ArtworkInput) -> Result<Artwork, RepositoryError> {
        let row: ArtworkRow = sqlx::query_as(&format!(
            "INSERT INTO artworks (owner_id, title, artist_name, description, images, price, \
                                   rental_price, category, season, space, width_cm, height_cm) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {ARTWORK_COLUMNS}"
        ))
        .bind(input.owner_id.as_i32())
        .bind(&input.title)
        .bind(&input.artist_name)
        .bind(&input.description)
        .bind(&input.images)
        .bind(input.price)
        .bind(input.rental_price)
        .bind(input.category)
        .bind(input.season)
        .bind(input.space)
        .bind(input.width_cm)
        .bind(input.height_cm)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace an artwork's editable fields.
    ///
    /// Editing sends the artwork back to `pending` moderation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist.
    pub async fn update(
        &self,
        id: ArtworkId,
        input: &ArtworkInput,
    ) -> Result<Artwork, RepositoryError> {
        let row: Option<ArtworkRow> = sqlx::query_as(&format!(
            "UPDATE artworks SET title = $1, artist_name = $2, description = $3, images = $4, \
                    price = $5, rental_price = $6, category = $7, season = $8, space = $9, \
                    width_cm = $10, height_cm = $11, status = 'pending', updated_at = NOW() \
             WHERE id = $12 \
             RETURNING {ARTWORK_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.artist_name)
        .bind(&input.description)
        .bind(&input.images)
        .bind(input.price)
        .bind(input.rental_price)
        .bind(input.category)
        .bind(input.season)
        .bind(input.space)
        .bind(input.width_cm)
        .bind(input.height_cm)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Artwork::from).ok_or(RepositoryError::NotFound)
    }

    /// Delete an artwork.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist.
    pub async fn delete(&self, id: ArtworkId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM artworks WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Set an artwork's moderation status (approve / reject).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist.
    pub async fn set_status(
        &self,
        id: ArtworkId,
        status: ApprovalStatus,
    ) -> Result<Artwork, RepositoryError> {
        let row: Option<ArtworkRow> = sqlx::query_as(&format!(
            "UPDATE artworks SET status = $1, updated_at = NOW() WHERE id = $2 \
             RETURNING {ARTWORK_COLUMNS}"
        ))
        .bind(status)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Artwork::from).ok_or(RepositoryError::NotFound)
    }

    /// Replace the featured set with the given artworks, in rank order.
    ///
    /// Clear-then-set: two statements without a wrapping transaction; a
    /// concurrent admin action can (rarely) interleave, which is accepted
    /// at this scale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a statement fails.
    pub async fn set_featured(&self, ids: &[ArtworkId]) -> Result<u64, RepositoryError> {
        sqlx::query(
            "UPDATE artworks SET featured = FALSE, featured_rank = NULL, updated_at = NOW() \
             WHERE featured",
        )
        .execute(self.pool)
        .await?;

        let mut flagged = 0;
        for (rank, id) in ids.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let rank = rank as i32;
            let result = sqlx::query(
                "UPDATE artworks SET featured = TRUE, featured_rank = $1, updated_at = NOW() \
                 WHERE id = $2 AND status = 'approved'",
            )
            .bind(rank)
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;
            flagged += result.rows_affected();
        }

        Ok(flagged)
    }

    /// Toggle the curated flag; returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist.
    pub async fn toggle_curated(&self, id: ArtworkId) -> Result<bool, RepositoryError> {
        let curated: Option<bool> = sqlx::query_scalar(
            "UPDATE artworks SET curated = NOT curated, updated_at = NOW() \
             WHERE id = $1 RETURNING curated",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        curated.ok_or(RepositoryError::NotFound)
    }

    /// Set the sold flag.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the artwork doesn't exist.
    pub async fn set_sold(&self, id: ArtworkId, sold: bool) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE artworks SET sold = $1, updated_at = NOW() WHERE id = $2")
                .bind(sold)
                .bind(id.as_i32())
                .execute(self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Every artwork, oldest first, for the spreadsheet export.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn all_for_export(&self) -> Result<Vec<Artwork>, RepositoryError> {
        let rows: Vec<ArtworkRow> = sqlx::query_as(&format!(
            "SELECT {ARTWORK_COLUMNS} FROM artworks ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Artwork::from).collect())
    }

    /// Find the artwork referencing an image path, if any.
    ///
    /// Spreadsheet import matches rows to existing records by the exact
    /// stored path string.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_image(&self, image: &str) -> Result<Option<Artwork>, RepositoryError> {
        let row: Option<ArtworkRow> = sqlx::query_as(&format!(
            "SELECT {ARTWORK_COLUMNS} FROM artworks WHERE $1 = ANY(images) \
             ORDER BY id ASC LIMIT 1"
        ))
        .bind(image)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Artwork::from))
    }

    /// Dashboard count of artworks awaiting moderation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn pending_count(&self) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM artworks WHERE status = 'pending'")
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_listing_query_filters() {
        let filter = ArtworkAdminFilter {
            status: Some(ApprovalStatus::Pending),
            category: Some(Category::Photography),
            owner_id: Some(UserId::new(7)),
            search: Some("dawn".to_string()),
        };
        let qb = build_admin_listing_query(&filter, None, 13);
        let sql = qb.sql();
        assert!(sql.contains("status ="));
        assert!(sql.contains("category ="));
        assert!(sql.contains("owner_id ="));
        assert!(sql.contains("title ILIKE"));
        assert!(sql.contains("ORDER BY created_at DESC, id DESC"));
    }

    #[test]
    fn test_admin_listing_query_unfiltered() {
        let qb = build_admin_listing_query(&ArtworkAdminFilter::default(), None, 13);
        let sql = qb.sql();
        assert!(sql.contains("WHERE TRUE"));
        assert!(!sql.contains("status ="));
    }
}
