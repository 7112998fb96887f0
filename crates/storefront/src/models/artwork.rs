//! Artwork view types returned by the public API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use maru_core::{
    ArtworkId, Category, CurrencyCode, PageCursor, Price, Season, SizeBucket, SpaceTag,
};

use super::user::ArtistProfile;

/// One gallery listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkSummary {
    pub id: ArtworkId,
    pub title: String,
    pub artist_name: String,
    /// First image of the artwork, if any.
    pub cover_image: Option<String>,
    pub price: Decimal,
    /// Pre-formatted KRW price (e.g., "₩1,200,000").
    pub price_display: String,
    pub rental_price: Option<Decimal>,
    pub category: Category,
    pub season: Option<Season>,
    pub space: Option<SpaceTag>,
    pub size: SizeBucket,
    pub sold: bool,
    pub created_at: DateTime<Utc>,
}

impl ArtworkSummary {
    /// Cursor naming this row's position in the listing order.
    #[must_use]
    pub const fn cursor(&self) -> PageCursor {
        PageCursor::new(self.created_at, self.id.as_i32())
    }

    /// Format a KRW amount for display.
    #[must_use]
    pub fn format_price(amount: Decimal) -> String {
        Price::new(amount, CurrencyCode::KRW).display()
    }
}

/// One page of the gallery listing.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkPage {
    pub artworks: Vec<ArtworkSummary>,
    /// Token for the next page; `None` when this page is the last.
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Full artwork record for the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ArtworkDetail {
    pub id: ArtworkId,
    pub title: String,
    pub artist_name: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: Decimal,
    pub price_display: String,
    pub rental_price: Option<Decimal>,
    pub category: Category,
    pub season: Option<Season>,
    pub space: Option<SpaceTag>,
    pub size: SizeBucket,
    pub width_cm: Decimal,
    pub height_cm: Decimal,
    pub sold: bool,
    pub created_at: DateTime<Utc>,
    /// The owning partner's public profile.
    pub artist: Option<ArtistProfile>,
}
