//! Order handlers (requires auth).

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use maru_core::ArtworkId;

use crate::db::OrderRepository;
use crate::db::orders::{NewOrder, Order};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireUser;
use crate::response;
use crate::state::AppState;

/// Checkout form fields.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub artwork_ids: Option<Vec<i32>>,
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub postcode: Option<String>,
    pub address: Option<String>,
    pub address_detail: Option<String>,
    pub memo: Option<String>,
}

/// Require a non-blank form field.
fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Create an order for the current user.
#[instrument(skip(state, user, form))]
pub async fn create(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Json(form): Json<OrderForm>,
) -> Result<Json<Value>> {
    let artwork_ids: Vec<ArtworkId> = form
        .artwork_ids
        .unwrap_or_default()
        .into_iter()
        .map(ArtworkId::new)
        .collect();
    if artwork_ids.is_empty() {
        return Err(AppError::BadRequest("artwork_ids is required".to_string()));
    }

    let new_order = NewOrder {
        artwork_ids,
        recipient_name: required(form.recipient_name, "recipient_name")?,
        recipient_phone: required(form.recipient_phone, "recipient_phone")?,
        postcode: required(form.postcode, "postcode")?,
        address: required(form.address, "address")?,
        address_detail: form.address_detail.filter(|v| !v.trim().is_empty()),
        memo: form.memo.filter(|v| !v.trim().is_empty()),
    };

    let order = OrderRepository::new(state.pool())
        .create(user.id, &new_order)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::BadRequest("one or more artworks are unavailable".to_string())
            }
            other => AppError::Database(other),
        })?;

    #[derive(Serialize)]
    struct Created {
        order: Order,
    }

    Ok(response::ok(Created { order }))
}

/// Order history for the current user.
#[instrument(skip(state, user))]
pub async fn list_own(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    #[derive(Serialize)]
    struct History {
        orders: Vec<Order>,
    }

    Ok(response::ok(History { orders }))
}
