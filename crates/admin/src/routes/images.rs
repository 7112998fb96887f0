//! Image upload and deletion handlers (staff).

use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireStaff;
use crate::response;
use crate::services::images::compress_to_webp;
use crate::services::storage::object_path;
use crate::state::AppState;

/// Collections an upload may target.
const ALLOWED_COLLECTIONS: &[&str] = &["artworks", "profiles", "journal"];

/// Upload an image.
///
/// Multipart fields: `file` (required), `collection` (optional, defaults to
/// `artworks`). The image is re-encoded as WebP with a bounded longest edge
/// and stored under `{collection}/{timestamp}_{name}.webp`.
#[instrument(skip(state, _staff, multipart))]
pub async fn upload(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut collection = "artworks".to_owned();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?
    {
        match field.name() {
            Some("collection") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
                if !ALLOWED_COLLECTIONS.contains(&value.as_str()) {
                    return Err(AppError::BadRequest(format!(
                        "unknown collection: {value}"
                    )));
                }
                collection = value;
            }
            Some("file") => {
                let name = field.file_name().unwrap_or("image").to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
                upload = Some((name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("file field is required".to_string()))?;

    let webp = compress_to_webp(&bytes, state.config().max_image_dimension)?;
    let path = object_path(&collection, &name, Utc::now().timestamp_millis());
    state.storage().put(&path, &webp).await?;

    tracing::info!(path = %path, bytes = webp.len(), "image stored");

    #[derive(Serialize)]
    struct Stored {
        path: String,
        url: String,
    }

    let url = format!("/media/{path}");
    Ok(response::ok(Stored { path, url }))
}

/// Deletion parameters.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub path: Option<String>,
}

/// Delete an image by its stored path string.
#[instrument(skip(state, _staff))]
pub async fn remove(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<Value>> {
    let path = params
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("path is required".to_string()))?;

    state.storage().delete(&path).await.map_err(|e| match e {
        crate::services::storage::StorageError::InvalidPath(p) => {
            AppError::BadRequest(format!("invalid path: {p}"))
        }
        other => AppError::Storage(other),
    })?;

    tracing::info!(path = %path, "image deleted");
    Ok(response::ok_empty())
}
