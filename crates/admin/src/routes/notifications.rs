//! Staff notification handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use maru_core::NotificationId;

use crate::db::{NotificationRepository, RepositoryError};
use crate::db::notifications::Notification;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireStaff;
use crate::response;
use crate::state::AppState;

/// Recent notifications for the logged-in staff member.
#[instrument(skip(state, staff))]
pub async fn list(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let notifications = NotificationRepository::new(state.pool())
        .list_for_user(staff.id, 50)
        .await?;

    #[derive(Serialize)]
    struct Notifications {
        notifications: Vec<Notification>,
    }

    Ok(response::ok(Notifications { notifications }))
}

/// Mark one notification read.
#[instrument(skip(state, staff))]
pub async fn mark_read(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    NotificationRepository::new(state.pool())
        .mark_read(NotificationId::new(id), staff.id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("notification {id}")),
            other => AppError::Database(other),
        })?;

    Ok(response::ok_empty())
}

/// Mark all notifications read.
#[instrument(skip(state, staff))]
pub async fn mark_all_read(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    NotificationRepository::new(state.pool())
        .mark_all_read(staff.id)
        .await?;

    Ok(response::ok_empty())
}
