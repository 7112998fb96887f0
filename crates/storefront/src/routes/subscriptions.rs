//! Rental subscription handlers (requires auth).

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use maru_core::ArtworkId;

use crate::db::RepositoryError;
use crate::db::SubscriptionRepository;
use crate::db::subscriptions::Subscription;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireUser;
use crate::response;
use crate::state::AppState;

/// Rental request form.
#[derive(Debug, Deserialize)]
pub struct SubscriptionForm {
    pub artwork_id: Option<i32>,
}

/// Request an artwork rental for the current user.
#[instrument(skip(state, user))]
pub async fn create(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(form): Json<SubscriptionForm>,
) -> Result<Json<Value>> {
    let artwork_id = form
        .artwork_id
        .map(ArtworkId::new)
        .ok_or_else(|| AppError::BadRequest("artwork_id is required".to_string()))?;

    let subscription = SubscriptionRepository::new(state.pool())
        .create_request(user.id, artwork_id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound(format!("artwork {artwork_id}"))
            }
            RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => AppError::Database(other),
        })?;

    #[derive(Serialize)]
    struct Created {
        subscription: Subscription,
    }

    Ok(response::ok(Created { subscription }))
}

/// Rental history for the current user.
#[instrument(skip(state, user))]
pub async fn list_own(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let subscriptions = SubscriptionRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    #[derive(Serialize)]
    struct History {
        subscriptions: Vec<Subscription>,
    }

    Ok(response::ok(History { subscriptions }))
}
