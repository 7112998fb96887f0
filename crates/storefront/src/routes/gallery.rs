//! Gallery listing and artwork detail handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use maru_core::{ArtworkId, ArtworkQuery, PageCursor};

use crate::db::{ArtworkRepository, WishlistRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::OptionalUser;
use crate::response;
use crate::state::AppState;

/// Raw listing parameters as sent by the gallery front-end.
///
/// Everything arrives as loose strings; malformed values are dropped when
/// building the [`ArtworkQuery`].
#[derive(Debug, Deserialize)]
pub struct GalleryParams {
    pub category: Option<String>,
    pub season: Option<String>,
    pub space: Option<String>,
    pub price_range: Option<String>,
    pub size: Option<String>,
    /// Free-text search over title and artist name.
    #[serde(rename = "q")]
    pub search: Option<String>,
    /// Opaque cursor from the previous page.
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Gallery listing with filters and cursor pagination.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<GalleryParams>,
) -> Result<Json<Value>> {
    let query = ArtworkQuery::from_params(
        params.category.as_deref(),
        params.season.as_deref(),
        params.space.as_deref(),
        params.price_range.as_deref(),
        params.size.as_deref(),
        params.search.as_deref(),
    );
    let cursor = params.cursor.as_deref().and_then(PageCursor::decode);

    let page = ArtworkRepository::new(state.pool())
        .list(&query, cursor, params.limit)
        .await?;

    Ok(response::ok(page))
}

/// Artwork detail (approved artworks only).
///
/// Logged-in visitors additionally get their wishlist membership for the
/// artwork.
#[instrument(skip(state, user))]
pub async fn show(
    OptionalUser(user): OptionalUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let artwork_id = ArtworkId::new(id);
    let artwork = ArtworkRepository::new(state.pool())
        .get_approved(artwork_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artwork {id}")))?;

    let wishlisted = match user {
        Some(user) => Some(
            WishlistRepository::new(state.pool())
                .contains(user.id, artwork_id)
                .await?,
        ),
        None => None,
    };

    #[derive(serde::Serialize)]
    struct Detail {
        artwork: crate::models::artwork::ArtworkDetail,
        #[serde(skip_serializing_if = "Option::is_none")]
        wishlisted: Option<bool>,
    }

    Ok(response::ok(Detail {
        artwork,
        wishlisted,
    }))
}
