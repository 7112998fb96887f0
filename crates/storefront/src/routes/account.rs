//! Account overview and notification handlers (requires auth).

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use maru_core::{NotificationId, UserRole};

use crate::db::{NotificationRepository, UserRepository};
use crate::db::notifications::Notification;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireUser;
use crate::response;
use crate::state::AppState;

/// Profile block returned by the account overview.
#[derive(Serialize)]
struct AccountView {
    id: maru_core::UserId,
    email: String,
    name: String,
    phone: Option<String>,
    role: UserRole,
    created_at: DateTime<Utc>,
}

/// Account overview: fresh profile plus unread notification count.
#[instrument(skip(state, user))]
pub async fn show(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let profile = UserRepository::new(state.pool())
        .get_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("account no longer exists".to_string()))?;

    let unread = NotificationRepository::new(state.pool())
        .unread_count(user.id)
        .await?;

    #[derive(Serialize)]
    struct Overview {
        user: AccountView,
        unread_notifications: i64,
    }

    Ok(response::ok(Overview {
        user: AccountView {
            id: profile.id,
            email: profile.email.as_str().to_owned(),
            name: profile.name,
            phone: profile.phone,
            role: profile.role,
            created_at: profile.created_at,
        },
        unread_notifications: unread,
    }))
}

/// Recent notifications for the current user.
#[instrument(skip(state, user))]
pub async fn notifications(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let notifications = NotificationRepository::new(state.pool())
        .list_for_user(user.id, 50)
        .await?;

    #[derive(Serialize)]
    struct Notifications {
        notifications: Vec<Notification>,
    }

    Ok(response::ok(Notifications { notifications }))
}

/// Mark one notification read.
#[instrument(skip(state, user))]
pub async fn mark_notification_read(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    NotificationRepository::new(state.pool())
        .mark_read(NotificationId::new(id), user.id)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => {
                AppError::NotFound(format!("notification {id}"))
            }
            other => AppError::Database(other),
        })?;

    Ok(response::ok_empty())
}

/// Mark all notifications read.
#[instrument(skip(state, user))]
pub async fn mark_all_notifications_read(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    NotificationRepository::new(state.pool())
        .mark_all_read(user.id)
        .await?;

    Ok(response::ok_empty())
}
