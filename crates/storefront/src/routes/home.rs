//! Home highlights and public settings handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::Value;
use sqlx::PgPool;
use tracing::instrument;

use crate::cache::{HIGHLIGHTS_KEY, HomeHighlights, SpotlightArtist};
use crate::db::{ArtworkRepository, SettingsRepository, UserRepository};
use crate::error::{AppError, Result};
use crate::response;
use crate::state::AppState;

/// How many curated picks the home page shows.
const CURATED_LIMIT: i64 = 8;

/// Load the highlight block from the database.
async fn load_highlights(pool: &PgPool) -> Result<Arc<HomeHighlights>> {
    let users = UserRepository::new(pool);
    let artworks = ArtworkRepository::new(pool);

    let spotlight = match users.spotlight_artist().await? {
        Some(profile) => {
            let artist_artworks = artworks.by_artist(profile.id).await?;
            Some(SpotlightArtist {
                profile,
                artworks: artist_artworks,
            })
        }
        None => None,
    };

    let featured = artworks.featured().await?;
    let curated = artworks.curated(CURATED_LIMIT).await?;

    Ok(Arc::new(HomeHighlights {
        spotlight,
        featured,
        curated,
    }))
}

/// Home highlights: spotlight artist, featured set, curated picks.
///
/// Served from the TTL cache; an admin change becomes visible within the
/// configured TTL.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<Json<Value>> {
    let pool = state.pool().clone();
    let highlights = state
        .highlights()
        .try_get_with(HIGHLIGHTS_KEY, async move { load_highlights(&pool).await })
        .await
        .map_err(|e: Arc<AppError>| AppError::Internal(e.to_string()))?;

    Ok(response::ok(highlights.as_ref()))
}

/// Public site settings (`site.`-prefixed keys).
#[instrument(skip(state))]
pub async fn site_settings(State(state): State<AppState>) -> Result<Json<Value>> {
    let entries = SettingsRepository::new(state.pool()).get_public().await?;
    let settings: BTreeMap<String, Value> = entries.into_iter().collect();

    #[derive(serde::Serialize)]
    struct Settings {
        settings: BTreeMap<String, Value>,
    }

    Ok(response::ok(Settings { settings }))
}
