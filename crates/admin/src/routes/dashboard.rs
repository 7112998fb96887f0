//! Dashboard summary handler.

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::db::{
    ArtworkRepository, InquiryRepository, OrderRepository, SubscriptionRepository, UserRepository,
};
use crate::error::Result;
use crate::middleware::auth::RequireAdmin;
use crate::response;
use crate::state::AppState;

/// Work queue counts for the dashboard landing page.
#[derive(Serialize)]
struct Summary {
    pending_artworks: i64,
    pending_partners: i64,
    new_inquiries: i64,
    pending_orders: i64,
    active_subscriptions: i64,
}

/// Moderation/work queue counts.
#[instrument(skip(state, _admin))]
pub async fn summary(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let pool = state.pool();

    let summary = Summary {
        pending_artworks: ArtworkRepository::new(pool).pending_count().await?,
        pending_partners: UserRepository::new(pool).pending_partner_count().await?,
        new_inquiries: InquiryRepository::new(pool).new_count().await?,
        pending_orders: OrderRepository::new(pool).pending_count().await?,
        active_subscriptions: SubscriptionRepository::new(pool).active_count().await?,
    };

    Ok(response::ok(summary))
}
