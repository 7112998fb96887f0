//! Customer authentication handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::session::CurrentUser;
use crate::models::user::User;
use crate::response;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration form fields.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
struct SessionUser {
    user: CurrentUser,
}

/// Require a non-blank form field.
fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

fn current_user(user: &User) -> CurrentUser {
    CurrentUser {
        id: user.id,
        email: user.email.as_str().to_owned(),
        name: user.name.clone(),
        role: user.role,
    }
}

async fn establish_session(session: &Session, user: &User) -> Result<CurrentUser> {
    let current = current_user(user);
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(current)
}

/// Create a customer account and log it in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<Json<Value>> {
    let email = required(form.email, "email")?;
    let password = required(form.password, "password")?;
    let name = required(form.name, "name")?;

    let user = AuthService::new(state.pool())
        .register(&email, &password, &name, form.phone.as_deref())
        .await?;

    let current = establish_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "customer registered");

    Ok(response::ok(SessionUser { user: current }))
}

/// Login with email and password.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<Value>> {
    let email = required(form.email, "email")?;
    let password = required(form.password, "password")?;

    let user = AuthService::new(state.pool()).login(&email, &password).await?;

    let current = establish_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "customer logged in");

    Ok(response::ok(SessionUser { user: current }))
}

/// Logout the current session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    clear_sentry_user();

    Ok(response::ok_empty())
}
