//! Public artwork read path, including the gallery listing query.
//!
//! The listing is a keyset-paginated query over `(created_at DESC, id DESC)`.
//! All filter predicates are optional and ANDed together; the repository
//! fetches one row beyond the requested page size to learn whether more
//! pages exist.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use maru_core::{
    ArtworkId, ArtworkQuery, Category, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageCursor, Season,
    SizeBucket, SpaceTag, UserId,
};

use super::RepositoryError;
use crate::models::artwork::{ArtworkDetail, ArtworkPage, ArtworkSummary};
use crate::models::user::ArtistProfile;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for listing queries (shared with the wishlist join).
#[derive(Debug, sqlx::FromRow)]
pub(super) struct ArtworkSummaryRow {
    id: i32,
    title: String,
    artist_name: String,
    images: Vec<String>,
    price: Decimal,
    rental_price: Option<Decimal>,
    category: Category,
    season: Option<Season>,
    space: Option<SpaceTag>,
    width_cm: Decimal,
    height_cm: Decimal,
    sold: bool,
    created_at: DateTime<Utc>,
}

impl From<ArtworkSummaryRow> for ArtworkSummary {
    fn from(row: ArtworkSummaryRow) -> Self {
        Self {
            id: ArtworkId::new(row.id),
            title: row.title,
            artist_name: row.artist_name,
            cover_image: row.images.first().cloned(),
            price: row.price,
            price_display: Self::format_price(row.price),
            rental_price: row.rental_price,
            category: row.category,
            season: row.season,
            space: row.space,
            size: SizeBucket::for_edges(row.width_cm, row.height_cm),
            sold: row.sold,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for the detail query (joins the owner's profile).
#[derive(Debug, sqlx::FromRow)]
struct ArtworkDetailRow {
    id: i32,
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
    sold: bool,
    created_at: DateTime<Utc>,
    owner_id: i32,
    owner_name: String,
    owner_bio: Option<String>,
    owner_profile_image: Option<String>,
}

impl From<ArtworkDetailRow> for ArtworkDetail {
    fn from(row: ArtworkDetailRow) -> Self {
        Self {
            id: ArtworkId::new(row.id),
            title: row.title,
            artist_name: row.artist_name,
            description: row.description,
            images: row.images,
            price: row.price,
            price_display: ArtworkSummary::format_price(row.price),
            rental_price: row.rental_price,
            category: row.category,
            season: row.season,
            space: row.space,
            size: SizeBucket::for_edges(row.width_cm, row.height_cm),
            width_cm: row.width_cm,
            height_cm: row.height_cm,
            sold: row.sold,
            created_at: row.created_at,
            artist: Some(ArtistProfile {
                id: UserId::new(row.owner_id),
                name: row.owner_name,
                bio: row.owner_bio,
                profile_image: row.owner_profile_image,
            }),
        }
    }
}

pub(super) const SUMMARY_COLUMNS: &str = "id, title, artist_name, images, price, rental_price, \
     category, season, space, width_cm, height_cm, sold, created_at";

// =============================================================================
// Query construction
// =============================================================================

/// Build the listing SELECT for the given filter, cursor, and fetch size.
///
/// `fetch` is the LIMIT actually sent to the database (page size + 1).
fn build_listing_query(
    query: &ArtworkQuery,
    cursor: Option<PageCursor>,
    fetch: i64,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {SUMMARY_COLUMNS} FROM artworks WHERE status = 'approved'"
    ));

    if let Some(category) = query.category {
        qb.push(" AND category = ");
        qb.push_bind(category);
    }
    if let Some(season) = query.season {
        qb.push(" AND season = ");
        qb.push_bind(season);
    }
    if let Some(space) = query.space {
        qb.push(" AND space = ");
        qb.push_bind(space);
    }
    if let Some(range) = query.price_range {
        let (min, max) = range.bounds_won();
        qb.push(" AND price >= ");
        qb.push_bind(min);
        if let Some(max) = max {
            qb.push(" AND price < ");
            qb.push_bind(max);
        }
    }
    if let Some(size) = query.size {
        let (min, max) = size.bounds_cm();
        qb.push(" AND GREATEST(width_cm, height_cm) >= ");
        qb.push_bind(min);
        if let Some(max) = max {
            qb.push(" AND GREATEST(width_cm, height_cm) < ");
            qb.push_bind(max);
        }
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", escape_like(search));
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

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Trim an over-fetched row set down to one page.
///
/// `rows` holds up to `limit + 1` entries in listing order; the extra row,
/// when present, only signals that another page exists.
fn assemble_page(mut rows: Vec<ArtworkSummary>, limit: usize) -> ArtworkPage {
    let has_more = rows.len() > limit;
    rows.truncate(limit);
    let next_cursor = rows.last().map(|artwork| artwork.cursor().encode());

    ArtworkPage {
        artworks: rows,
        next_cursor,
        has_more,
    }
}

/// Clamp a client-requested page size into the allowed range.
fn clamp_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the public artwork read path.
pub struct ArtworkRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtworkRepository<'a> {
    /// Create a new artwork repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Run the gallery listing query.
    ///
    /// Returns one page of approved artworks matching `query`, starting
    /// strictly after `cursor` in `(created_at DESC, id DESC)` order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        query: &ArtworkQuery,
        cursor: Option<PageCursor>,
        limit: Option<i64>,
    ) -> Result<ArtworkPage, RepositoryError> {
        let limit = clamp_limit(limit);
        let mut qb = build_listing_query(query, cursor, limit + 1);

        let rows: Vec<ArtworkSummaryRow> = qb.build_query_as().fetch_all(self.pool).await?;
        let summaries = rows.into_iter().map(ArtworkSummary::from).collect();

        #[allow(clippy::cast_sign_loss)] // limit is clamped to [1, MAX_PAGE_SIZE]
        let limit = limit as usize;
        Ok(assemble_page(summaries, limit))
    }

    /// Get an approved artwork with its artist profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_approved(
        &self,
        id: ArtworkId,
    ) -> Result<Option<ArtworkDetail>, RepositoryError> {
        let row: Option<ArtworkDetailRow> = sqlx::query_as(
            r"
            SELECT a.id, a.title, a.artist_name, a.description, a.images,
                   a.price, a.rental_price, a.category, a.season, a.space,
                   a.width_cm, a.height_cm, a.sold, a.created_at,
                   u.id AS owner_id, u.name AS owner_name, u.bio AS owner_bio,
                   u.profile_image AS owner_profile_image
            FROM artworks a
            JOIN users u ON u.id = a.owner_id
            WHERE a.id = $1 AND a.status = 'approved'
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ArtworkDetail::from))
    }

    /// Featured artworks for the home page, in curator rank order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn featured(&self) -> Result<Vec<ArtworkSummary>, RepositoryError> {
        let rows: Vec<ArtworkSummaryRow> = sqlx::query_as(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM artworks \
             WHERE featured AND status = 'approved' \
             ORDER BY featured_rank NULLS LAST, created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ArtworkSummary::from).collect())
    }

    /// Most recent curated picks.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn curated(&self, limit: i64) -> Result<Vec<ArtworkSummary>, RepositoryError> {
        let rows: Vec<ArtworkSummaryRow> = sqlx::query_as(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM artworks \
             WHERE curated AND status = 'approved' \
             ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ArtworkSummary::from).collect())
    }

    /// Approved artworks by one artist, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn by_artist(
        &self,
        owner_id: UserId,
    ) -> Result<Vec<ArtworkSummary>, RepositoryError> {
        let rows: Vec<ArtworkSummaryRow> = sqlx::query_as(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM artworks \
             WHERE owner_id = $1 AND status = 'approved' \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(owner_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ArtworkSummary::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn summary(id: i32, created_at: DateTime<Utc>) -> ArtworkSummary {
        ArtworkSummary {
            id: ArtworkId::new(id),
            title: format!("Untitled {id}"),
            artist_name: "Han Yujin".to_string(),
            cover_image: None,
            price: Decimal::from(800_000),
            price_display: ArtworkSummary::format_price(Decimal::from(800_000)),
            rental_price: None,
            category: Category::Painting,
            season: None,
            space: None,
            size: SizeBucket::Medium,
            sold: false,
            created_at,
        }
    }

    /// Apply the listing's cursor predicate to an in-memory data set, the
    /// way the database would.
    fn page_after(
        all: &[ArtworkSummary],
        cursor: Option<PageCursor>,
        limit: usize,
    ) -> Vec<ArtworkSummary> {
        all.iter()
            .filter(|a| {
                cursor.is_none_or(|c| {
                    (a.created_at, a.id.as_i32()) < (c.created_at, c.id)
                })
            })
            .take(limit + 1)
            .cloned()
            .collect()
    }

    fn dataset(count: i32) -> Vec<ArtworkSummary> {
        // Descending creation order with id tie-breaks inside equal seconds.
        let mut rows: Vec<ArtworkSummary> = (1..=count)
            .map(|id| {
                let created_at = Utc
                    .timestamp_opt(1_760_000_000 + i64::from(id / 3), 0)
                    .unwrap();
                summary(id, created_at)
            })
            .collect();
        rows.sort_by_key(|a| std::cmp::Reverse((a.created_at, a.id.as_i32())));
        rows
    }

    #[test]
    fn test_build_listing_query_empty_filter() {
        let qb = build_listing_query(&ArtworkQuery::default(), None, 13);
        let sql = qb.sql();
        assert!(sql.contains("WHERE status = 'approved'"));
        assert!(sql.contains("ORDER BY created_at DESC, id DESC"));
        assert!(!sql.contains("ILIKE"));
        assert!(!sql.contains("category ="));
    }

    #[test]
    fn test_build_listing_query_all_predicates() {
        let query = ArtworkQuery::from_params(
            Some("painting"),
            Some("winter"),
            Some("office"),
            Some("500k_to_1m"),
            Some("large"),
            Some("moon"),
        );
        let cursor = PageCursor::new(Utc.timestamp_opt(1_760_000_000, 0).unwrap(), 42);
        let qb = build_listing_query(&query, Some(cursor), 13);
        let sql = qb.sql();

        assert!(sql.contains("category ="));
        assert!(sql.contains("season ="));
        assert!(sql.contains("space ="));
        assert!(sql.contains("price >="));
        assert!(sql.contains("price <"));
        assert!(sql.contains("GREATEST(width_cm, height_cm) >="));
        assert!(sql.contains("title ILIKE"));
        assert!(sql.contains("artist_name ILIKE"));
        assert!(sql.contains("(created_at, id) <"));
    }

    #[test]
    fn test_open_ended_buckets_have_no_upper_bound() {
        let query = ArtworkQuery::from_params(None, None, None, Some("over_3m"), None, None);
        let qb = build_listing_query(&query, None, 13);
        assert!(qb.sql().contains("price >="));
        assert!(!qb.sql().contains("price <"));
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("moonlight"), "moonlight");
    }

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_SIZE);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(1000)), MAX_PAGE_SIZE);
        assert_eq!(clamp_limit(Some(20)), 20);
    }

    #[test]
    fn test_assemble_page_full_page_has_more() {
        let all = dataset(30);
        let rows = page_after(&all, None, 12);
        assert_eq!(rows.len(), 13);

        let page = assemble_page(rows, 12);
        assert_eq!(page.artworks.len(), 12);
        assert!(page.has_more);
        let last = page.artworks.last().unwrap();
        assert_eq!(page.next_cursor, Some(last.cursor().encode()));
    }

    #[test]
    fn test_assemble_page_short_page_is_exhausted() {
        let all = dataset(5);
        let rows = page_after(&all, None, 12);
        let page = assemble_page(rows, 12);
        assert_eq!(page.artworks.len(), 5);
        assert!(!page.has_more);
        assert!(page.next_cursor.is_some());
    }

    #[test]
    fn test_paging_never_repeats_an_id() {
        let all = dataset(40);
        let mut seen = std::collections::HashSet::new();
        let mut cursor = None;

        loop {
            let page = assemble_page(page_after(&all, cursor, 12), 12);
            for artwork in &page.artworks {
                assert!(seen.insert(artwork.id), "id {} repeated", artwork.id);
            }
            if !page.has_more {
                break;
            }
            cursor = page.next_cursor.as_deref().and_then(PageCursor::decode);
        }

        assert_eq!(seen.len(), 40);
    }

    #[test]
    fn test_first_page_is_most_recent_in_descending_order() {
        let all = dataset(40);
        let page = assemble_page(page_after(&all, None, 12), 12);
        let pairs: Vec<_> = page
            .artworks
            .iter()
            .map(|a| (a.created_at, a.id.as_i32()))
            .collect();
        let mut sorted = pairs.clone();
        sorted.sort_by_key(|&pair| std::cmp::Reverse(pair));
        assert_eq!(pairs, sorted);

        // The very first row is the globally newest one.
        assert_eq!(pairs.first(), Some(&(all[0].created_at, all[0].id.as_i32())));
    }
}
