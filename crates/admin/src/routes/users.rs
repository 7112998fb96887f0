//! User management handlers (admin) and staff self-service profile.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use maru_core::{ApprovalStatus, Email, UserId, UserRole};

use crate::db::{RepositoryError, UserRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdmin, RequireStaff};
use crate::models::user::User;
use crate::response;
use crate::services::auth::hash_password;
use crate::state::AppState;

#[derive(Serialize)]
struct OneUser {
    user: User,
}

/// Map a not-found repository error onto a 404.
fn map_user_error(id: i32, e: RepositoryError) -> AppError {
    match e {
        RepositoryError::NotFound => AppError::NotFound(format!("user {id}")),
        other => AppError::Database(other),
    }
}

/// Listing parameters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// admin | partner | user
    pub role: Option<String>,
}

/// List users, optionally by role.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>> {
    let role = params.role.as_deref().and_then(|r| r.parse().ok());
    let users = UserRepository::new(state.pool()).list(role).await?;

    #[derive(Serialize)]
    struct Users {
        users: Vec<User>,
    }

    Ok(response::ok(Users { users }))
}

/// One user.
#[instrument(skip(state, _admin))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let user = UserRepository::new(state.pool())
        .get_by_id(UserId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {id}")))?;

    Ok(response::ok(OneUser { user }))
}

/// Account creation form.
#[derive(Debug, Deserialize)]
pub struct CreateForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    /// admin | partner | user (defaults to partner)
    pub role: Option<String>,
}

/// Create a staff or partner account.
#[instrument(skip(state, _admin, form))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<CreateForm>,
) -> Result<Json<Value>> {
    let email = form
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("email is required".to_string()))?;
    let email =
        Email::parse(email).map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
    let password = form
        .password
        .filter(|p| p.len() >= 8)
        .ok_or_else(|| AppError::BadRequest("password of at least 8 characters is required".to_string()))?;
    let name = form
        .name
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::BadRequest("name is required".to_string()))?;
    let role: UserRole = form
        .role
        .as_deref()
        .unwrap_or("partner")
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    let password_hash = hash_password(&password)?;
    let user = UserRepository::new(state.pool())
        .create(&email, &password_hash, &name, role)
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(msg) => AppError::BadRequest(msg),
            other => AppError::Database(other),
        })?;

    tracing::info!(user_id = %user.id, role = %user.role, "account created");
    Ok(response::ok(OneUser { user }))
}

/// Approve a partner account.
#[instrument(skip(state, _admin))]
pub async fn approve(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let user = UserRepository::new(state.pool())
        .set_approval(UserId::new(id), ApprovalStatus::Approved)
        .await
        .map_err(|e| map_user_error(id, e))?;

    Ok(response::ok(OneUser { user }))
}

/// Reject a partner account.
#[instrument(skip(state, _admin))]
pub async fn reject(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let user = UserRepository::new(state.pool())
        .set_approval(UserId::new(id), ApprovalStatus::Rejected)
        .await
        .map_err(|e| map_user_error(id, e))?;

    Ok(response::ok(OneUser { user }))
}

/// Role change form.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: Option<String>,
}

/// Change a user's role.
#[instrument(skip(state, _admin, form))]
pub async fn update_role(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<RoleForm>,
) -> Result<Json<Value>> {
    let role: UserRole = form
        .role
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("role is required".to_string()))?
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    let user = UserRepository::new(state.pool())
        .update_role(UserId::new(id), role)
        .await
        .map_err(|e| map_user_error(id, e))?;

    Ok(response::ok(OneUser { user }))
}

/// Delete a user.
#[instrument(skip(state, admin))]
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    if admin.id.as_i32() == id {
        return Err(AppError::BadRequest(
            "you cannot delete your own account".to_string(),
        ));
    }

    UserRepository::new(state.pool())
        .delete(UserId::new(id))
        .await
        .map_err(|e| map_user_error(id, e))?;

    Ok(response::ok_empty())
}

/// Spotlight one artist; any previously spotlighted artist is unset.
#[instrument(skip(state, _admin))]
pub async fn spotlight(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let user = UserRepository::new(state.pool())
        .set_spotlight(UserId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::BadRequest(
                "spotlight requires an approved partner account".to_string(),
            ),
            other => AppError::Database(other),
        })?;

    Ok(response::ok(OneUser { user }))
}

/// Clear the spotlight entirely.
#[instrument(skip(state, _admin))]
pub async fn clear_spotlight(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    UserRepository::new(state.pool()).clear_spotlight().await?;
    Ok(response::ok_empty())
}

/// Own-profile update form.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

/// Update the logged-in staff member's profile.
#[instrument(skip(state, staff, form))]
pub async fn update_own_profile(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<Value>> {
    let name = form
        .name
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or(staff.name);

    let user = UserRepository::new(state.pool())
        .update_profile(
            staff.id,
            &name,
            form.phone.as_deref(),
            form.bio.as_deref(),
            form.profile_image.as_deref(),
        )
        .await
        .map_err(|e| map_user_error(staff.id.as_i32(), e))?;

    Ok(response::ok(OneUser { user }))
}
