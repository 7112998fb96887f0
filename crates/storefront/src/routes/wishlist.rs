//! Wishlist handlers (requires auth).

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use maru_core::ArtworkId;

use crate::db::WishlistRepository;
use crate::error::Result;
use crate::middleware::auth::RequireUser;
use crate::models::artwork::ArtworkSummary;
use crate::response;
use crate::state::AppState;

/// Toggle an artwork in the current user's wishlist.
#[instrument(skip(state, user))]
pub async fn toggle(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let wishlisted = WishlistRepository::new(state.pool())
        .toggle(user.id, ArtworkId::new(id))
        .await?;

    #[derive(Serialize)]
    struct Toggled {
        wishlisted: bool,
    }

    Ok(response::ok(Toggled { wishlisted }))
}

/// The current user's wishlisted artworks.
#[instrument(skip(state, user))]
pub async fn list(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let artworks = WishlistRepository::new(state.pool()).list(user.id).await?;

    #[derive(Serialize)]
    struct Wishlist {
        artworks: Vec<ArtworkSummary>,
    }

    Ok(response::ok(Wishlist { artworks }))
}
