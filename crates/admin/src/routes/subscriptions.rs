//! Subscription (rental) management handlers (admin).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use maru_core::{SubscriptionId, SubscriptionStatus};

use crate::db::{RepositoryError, SubscriptionRepository};
use crate::db::subscriptions::AdminSubscription;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdmin;
use crate::response;
use crate::state::AppState;

#[derive(Serialize)]
struct OneSubscription {
    subscription: AdminSubscription,
}

fn map_not_found(id: i32, e: RepositoryError) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::NotFound(format!("subscription {id}")),
        other => AppError::Database(other),
    }
}

/// Listing parameters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// requested | active | paused | cancelled | expired
    pub status: Option<String>,
}

/// List subscriptions, optionally by status.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>> {
    let status = params.status.as_deref().and_then(|s| s.parse().ok());
    let subscriptions = SubscriptionRepository::new(state.pool()).list(status).await?;

    #[derive(Serialize)]
    struct Subscriptions {
        subscriptions: Vec<AdminSubscription>,
    }

    Ok(response::ok(Subscriptions { subscriptions }))
}

/// Activate a requested or paused rental.
#[instrument(skip(state, _admin))]
pub async fn activate(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let subscription = SubscriptionRepository::new(state.pool())
        .activate(SubscriptionId::new(id))
        .await
        .map_err(|e| map_not_found(id, e))?;

    Ok(response::ok(OneSubscription { subscription }))
}

/// Advance a rental's billing period by one month.
#[instrument(skip(state, _admin))]
pub async fn renew(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let subscription = SubscriptionRepository::new(state.pool())
        .renew(SubscriptionId::new(id))
        .await
        .map_err(|e| map_not_found(id, e))?;

    Ok(response::ok(OneSubscription { subscription }))
}

/// Status change form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: Option<String>,
}

/// Set a subscription's status (pause / cancel / expire).
#[instrument(skip(state, _admin, form))]
pub async fn set_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<StatusForm>,
) -> Result<Json<Value>> {
    let status: SubscriptionStatus = form
        .status
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("status is required".to_string()))?
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    let subscription = SubscriptionRepository::new(state.pool())
        .set_status(SubscriptionId::new(id), status)
        .await
        .map_err(|e| map_not_found(id, e))?;

    Ok(response::ok(OneSubscription { subscription }))
}
