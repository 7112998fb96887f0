//! Staff authentication handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{RequireStaff, clear_current_staff, set_current_staff};
use crate::models::session::CurrentStaff;
use crate::response;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
struct SessionStaff {
    staff: CurrentStaff,
}

/// Require a non-blank form field.
fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Staff login (admin or approved partner).
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<Value>> {
    let email = required(form.email, "email")?;
    let password = required(form.password, "password")?;

    let user = AuthService::new(state.pool())
        .login_staff(&email, &password)
        .await?;

    let staff = CurrentStaff {
        id: user.id,
        email: user.email.as_str().to_owned(),
        name: user.name.clone(),
        role: user.role,
    };
    set_current_staff(&session, &staff)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    tracing::info!(user_id = %user.id, role = %user.role, "staff logged in");

    Ok(response::ok(SessionStaff { staff }))
}

/// Logout the current session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_staff(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    Ok(response::ok_empty())
}

/// The current staff member.
#[instrument(skip(staff))]
pub async fn me(RequireStaff(staff): RequireStaff) -> Result<Json<Value>> {
    Ok(response::ok(SessionStaff { staff }))
}
