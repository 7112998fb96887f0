//! Order management handlers (admin).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use maru_core::{NotificationKind, OrderId, OrderStatus};

use crate::db::{NotificationRepository, OrderRepository, RepositoryError};
use crate::db::orders::AdminOrder;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdmin;
use crate::response;
use crate::state::AppState;

#[derive(Serialize)]
struct OneOrder {
    order: AdminOrder,
}

/// Listing parameters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// pending | paid | shipped | cancelled | refunded
    pub status: Option<String>,
}

/// List orders, optionally by status.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>> {
    let status = params.status.as_deref().and_then(|s| s.parse().ok());
    let orders = OrderRepository::new(state.pool()).list(status).await?;

    #[derive(Serialize)]
    struct Orders {
        orders: Vec<AdminOrder>,
    }

    Ok(response::ok(Orders { orders }))
}

/// One order with items.
#[instrument(skip(state, _admin))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let order = OrderRepository::new(state.pool())
        .get(OrderId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(response::ok(OneOrder { order }))
}

/// Status change form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: Option<String>,
}

/// Set an order's status; paid/shipped transitions notify the purchaser.
#[instrument(skip(state, _admin, form))]
pub async fn set_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<StatusForm>,
) -> Result<Json<Value>> {
    let status: OrderStatus = form
        .status
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("status is required".to_string()))?
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    let order = OrderRepository::new(state.pool())
        .set_status(OrderId::new(id), status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("order {id}")),
            other => AppError::Database(other),
        })?;

    let notification = match status {
        OrderStatus::Paid => Some((
            NotificationKind::OrderPaid,
            format!("Payment confirmed for order #{}.", order.id),
        )),
        OrderStatus::Shipped => Some((
            NotificationKind::OrderShipped,
            format!("Order #{} is on its way.", order.id),
        )),
        _ => None,
    };

    if let Some((kind, message)) = notification
        && let Err(e) = NotificationRepository::new(state.pool())
            .notify(order.user_id, kind, &message, None)
            .await
    {
        tracing::warn!(error = %e, order_id = %order.id, "Failed to write order notification");
    }

    Ok(response::ok(OneOrder { order }))
}
