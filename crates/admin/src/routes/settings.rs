//! Settings handlers (admin).

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::middleware::auth::RequireAdmin;
use crate::response;
use crate::state::AppState;

/// All settings, keyed.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Value>> {
    let entries = SettingsRepository::new(state.pool()).get_all().await?;
    let settings: BTreeMap<String, Value> = entries.into_iter().collect();

    #[derive(Serialize)]
    struct Settings {
        settings: BTreeMap<String, Value>,
    }

    Ok(response::ok(Settings { settings }))
}

/// Set one settings key to the posted JSON value.
#[instrument(skip(state, _admin, value))]
pub async fn set(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(value): Json<Value>,
) -> Result<Json<Value>> {
    SettingsRepository::new(state.pool()).set(&key, &value).await?;
    tracing::info!(key = %key, "setting updated");

    Ok(response::ok_empty())
}

/// Delete one settings key.
#[instrument(skip(state, _admin))]
pub async fn remove(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>> {
    SettingsRepository::new(state.pool()).delete(&key).await?;

    Ok(response::ok_empty())
}
