//! Artwork domain types for the dashboard.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use maru_core::{ApprovalStatus, ArtworkId, Category, Season, SpaceTag, UserId};

/// A full artwork record as managed by staff.
#[derive(Debug, Clone, Serialize)]
pub struct Artwork {
    pub id: ArtworkId,
    pub owner_id: UserId,
    pub title: String,
    pub artist_name: String,
    pub description: String,
    /// Storage paths; the first entry is the cover image.
    pub images: Vec<String>,
    pub price: Decimal,
    pub rental_price: Option<Decimal>,
    pub category: Category,
    pub season: Option<Season>,
    pub space: Option<SpaceTag>,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
    pub status: ApprovalStatus,
    pub featured: bool,
    pub featured_rank: Option<i32>,
    pub curated: bool,
    pub sold: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Whitelisted fields for creating or replacing an artwork.
#[derive(Debug, Clone)]
pub struct ArtworkInput {
    pub owner_id: UserId,
    pub title: String,
    pub artist_name: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: Decimal,
    pub rental_price: Option<Decimal>,
    pub category: Category,
    pub season: Option<Season>,
    pub space: Option<SpaceTag>,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
}

/// Filter for the management listing.
#[derive(Debug, Clone, Default)]
pub struct ArtworkAdminFilter {
    pub status: Option<ApprovalStatus>,
    pub category: Option<Category>,
    /// Restrict to one partner's artworks (forced for partner sessions).
    pub owner_id: Option<UserId>,
    /// Substring match on title or artist name.
    pub search: Option<String>,
}

/// One page of the management listing.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkAdminPage {
    pub artworks: Vec<Artwork>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}
