//! Public artist profile handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use maru_core::UserId;

use crate::db::{ArtworkRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::models::artwork::ArtworkSummary;
use crate::models::user::ArtistProfile;
use crate::response;
use crate::state::AppState;

/// All approved artist partners.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>> {
    let artists = UserRepository::new(state.pool()).list_artists().await?;

    #[derive(Serialize)]
    struct Index {
        artists: Vec<ArtistProfile>,
    }

    Ok(response::ok(Index { artists }))
}

/// One artist's profile with their approved artworks.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Value>> {
    let artist_id = UserId::new(id);
    let artist = UserRepository::new(state.pool())
        .get_artist(artist_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {id}")))?;

    let artworks = ArtworkRepository::new(state.pool())
        .by_artist(artist_id)
        .await?;

    #[derive(Serialize)]
    struct Profile {
        artist: ArtistProfile,
        artworks: Vec<ArtworkSummary>,
    }

    Ok(response::ok(Profile { artist, artworks }))
}
