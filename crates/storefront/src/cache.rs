//! In-memory cache for home-page highlights.
//!
//! Admin mutations land in a different process, so the storefront cannot be
//! invalidated directly; a short TTL bounds staleness instead.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;

use crate::models::artwork::ArtworkSummary;
use crate::models::user::ArtistProfile;

/// The spotlighted artist with their approved artworks.
#[derive(Debug, Clone, Serialize)]
pub struct SpotlightArtist {
    #[serde(flatten)]
    pub profile: ArtistProfile,
    pub artworks: Vec<ArtworkSummary>,
}

/// Everything the home page needs in one cacheable value.
#[derive(Debug, Clone, Serialize)]
pub struct HomeHighlights {
    pub spotlight: Option<SpotlightArtist>,
    pub featured: Vec<ArtworkSummary>,
    pub curated: Vec<ArtworkSummary>,
}

/// Cache handle for home highlights.
pub type HighlightCache = Cache<&'static str, Arc<HomeHighlights>>;

/// Cache key for the single highlights entry.
pub const HIGHLIGHTS_KEY: &str = "home";

/// Build the highlight cache with the configured TTL.
#[must_use]
pub fn build_highlight_cache(ttl: Duration) -> HighlightCache {
    Cache::builder().max_capacity(4).time_to_live(ttl).build()
}
