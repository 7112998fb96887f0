//! Artwork management handlers.
//!
//! Admins operate on the whole catalog; partners are scoped to their own
//! artworks at every entry point.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use maru_core::{
    ApprovalStatus, ArtworkId, Category, NotificationKind, PageCursor, Season, SpaceTag, UserId,
    UserRole,
};

use crate::db::{ArtworkRepository, NotificationRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::{RequireAdmin, RequireStaff};
use crate::models::artwork::{Artwork, ArtworkAdminFilter, ArtworkInput};
use crate::models::session::CurrentStaff;
use crate::response;
use crate::services::spreadsheet;
use crate::state::AppState;

/// Management listing parameters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// pending | approved | rejected
    pub status: Option<String>,
    pub category: Option<String>,
    /// Admins may scope to one partner; ignored for partner sessions.
    pub owner_id: Option<i32>,
    #[serde(rename = "q")]
    pub search: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Artwork create/update form.
#[derive(Debug, Deserialize)]
pub struct ArtworkForm {
    /// Admins may create on behalf of a partner.
    pub owner_id: Option<i32>,
    pub title: Option<String>,
    pub artist_name: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub price: Option<Decimal>,
    pub rental_price: Option<Decimal>,
    pub category: Option<String>,
    pub season: Option<String>,
    pub space: Option<String>,
    pub width_cm: Option<Decimal>,
    pub height_cm: Option<Decimal>,
}

#[derive(Serialize)]
struct OneArtwork {
    artwork: Artwork,
}

/// Validate the form into a repository input.
fn build_input(form: ArtworkForm, staff: &CurrentStaff) -> Result<ArtworkInput> {
    let owner_id = if staff.role == UserRole::Admin {
        form.owner_id.map_or(staff.id, UserId::new)
    } else {
        // Partners always own what they submit.
        staff.id
    };

    let title = form
        .title
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("title is required".to_string()))?;
    let artist_name = form
        .artist_name
        .map(|a| a.trim().to_owned())
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::BadRequest("artist_name is required".to_string()))?;
    let price = form
        .price
        .ok_or_else(|| AppError::BadRequest("price is required".to_string()))?;
    let category = form
        .category
        .as_deref()
        .and_then(Category::from_param)
        .ok_or_else(|| AppError::BadRequest("category is required".to_string()))?;
    let width_cm = form
        .width_cm
        .ok_or_else(|| AppError::BadRequest("width_cm is required".to_string()))?;
    let height_cm = form
        .height_cm
        .ok_or_else(|| AppError::BadRequest("height_cm is required".to_string()))?;

    Ok(ArtworkInput {
        owner_id,
        title,
        artist_name,
        description: form.description.unwrap_or_default(),
        images: form.images.unwrap_or_default(),
        price,
        rental_price: form.rental_price,
        category,
        season: form.season.as_deref().and_then(Season::from_param),
        space: form.space.as_deref().and_then(SpaceTag::from_param),
        width_cm,
        height_cm,
    })
}

/// Fetch an artwork and enforce partner scoping.
async fn load_scoped(
    state: &AppState,
    staff: &CurrentStaff,
    id: ArtworkId,
) -> Result<Artwork> {
    let artwork = ArtworkRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artwork {id}")))?;

    if staff.role == UserRole::Partner && artwork.owner_id != staff.id {
        return Err(AppError::Forbidden(
            "partners can only manage their own artworks".to_string(),
        ));
    }

    Ok(artwork)
}

/// Management listing with filters and cursor pagination.
#[instrument(skip(state, staff))]
pub async fn list(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>> {
    let owner_id = if staff.role == UserRole::Partner {
        Some(staff.id)
    } else {
        params.owner_id.map(UserId::new)
    };

    let filter = ArtworkAdminFilter {
        status: params.status.as_deref().and_then(|s| s.parse().ok()),
        category: params.category.as_deref().and_then(Category::from_param),
        owner_id,
        search: params
            .search
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty()),
    };
    let cursor = params.cursor.as_deref().and_then(PageCursor::decode);

    let page = ArtworkRepository::new(state.pool())
        .list(&filter, cursor, params.limit)
        .await?;

    Ok(response::ok(page))
}

/// One artwork.
#[instrument(skip(state, staff))]
pub async fn show(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let artwork = load_scoped(&state, &staff, ArtworkId::new(id)).await?;
    Ok(response::ok(OneArtwork { artwork }))
}

/// Create an artwork (enters moderation as pending).
#[instrument(skip(state, staff, form))]
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(form): Json<ArtworkForm>,
) -> Result<Json<Value>> {
    let input = build_input(form, &staff)?;
    let artwork = ArtworkRepository::new(state.pool()).create(&input).await?;

    tracing::info!(artwork_id = %artwork.id, owner_id = %artwork.owner_id, "artwork created");
    Ok(response::ok(OneArtwork { artwork }))
}

/// Update an artwork (returns it to moderation).
#[instrument(skip(state, staff, form))]
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<ArtworkForm>,
) -> Result<Json<Value>> {
    let id = ArtworkId::new(id);
    let existing = load_scoped(&state, &staff, id).await?;

    let mut input = build_input(form, &staff)?;
    // Ownership never moves on update.
    input.owner_id = existing.owner_id;

    let artwork = ArtworkRepository::new(state.pool()).update(id, &input).await?;
    Ok(response::ok(OneArtwork { artwork }))
}

/// Delete an artwork.
#[instrument(skip(state, staff))]
pub async fn remove(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let id = ArtworkId::new(id);
    load_scoped(&state, &staff, id).await?;

    ArtworkRepository::new(state.pool()).delete(id).await?;
    Ok(response::ok_empty())
}

/// Moderation decision plumbing shared by approve/reject.
async fn moderate(
    state: &AppState,
    id: ArtworkId,
    status: ApprovalStatus,
    kind: NotificationKind,
    verdict: &str,
) -> Result<Artwork> {
    let artwork = ArtworkRepository::new(state.pool())
        .set_status(id, status)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound(format!("artwork {id}")),
            other => AppError::Database(other),
        })?;

    let message = format!("Your artwork \"{}\" was {verdict}.", artwork.title);
    if let Err(e) = NotificationRepository::new(state.pool())
        .notify(artwork.owner_id, kind, &message, Some(artwork.id))
        .await
    {
        tracing::warn!(error = %e, artwork_id = %artwork.id, "Failed to write moderation notification");
    }

    Ok(artwork)
}

/// Approve an artwork and notify its owner.
#[instrument(skip(state, _admin))]
pub async fn approve(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let artwork = moderate(
        &state,
        ArtworkId::new(id),
        ApprovalStatus::Approved,
        NotificationKind::ArtworkApproved,
        "approved",
    )
    .await?;

    Ok(response::ok(OneArtwork { artwork }))
}

/// Reject an artwork and notify its owner.
#[instrument(skip(state, _admin))]
pub async fn reject(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let artwork = moderate(
        &state,
        ArtworkId::new(id),
        ApprovalStatus::Rejected,
        NotificationKind::ArtworkRejected,
        "rejected",
    )
    .await?;

    Ok(response::ok(OneArtwork { artwork }))
}

/// Featured-set form.
#[derive(Debug, Deserialize)]
pub struct FeaturedForm {
    pub artwork_ids: Option<Vec<i32>>,
}

/// Replace the featured set (clear-then-set).
#[instrument(skip(state, _admin, form))]
pub async fn set_featured(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(form): Json<FeaturedForm>,
) -> Result<Json<Value>> {
    let ids: Vec<ArtworkId> = form
        .artwork_ids
        .unwrap_or_default()
        .into_iter()
        .map(ArtworkId::new)
        .collect();

    let featured = ArtworkRepository::new(state.pool()).set_featured(&ids).await?;

    #[derive(Serialize)]
    struct Featured {
        featured: u64,
    }

    Ok(response::ok(Featured { featured }))
}

/// Toggle the curated flag.
#[instrument(skip(state, _admin))]
pub async fn curate(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    let curated = ArtworkRepository::new(state.pool())
        .toggle_curated(ArtworkId::new(id))
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound(format!("artwork {id}")),
            other => AppError::Database(other),
        })?;

    #[derive(Serialize)]
    struct Curated {
        curated: bool,
    }

    Ok(response::ok(Curated { curated }))
}

/// Sold-flag form.
#[derive(Debug, Deserialize)]
pub struct SoldForm {
    pub sold: Option<bool>,
}

/// Set the sold flag.
#[instrument(skip(state, _admin, form))]
pub async fn set_sold(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<SoldForm>,
) -> Result<Json<Value>> {
    let sold = form
        .sold
        .ok_or_else(|| AppError::BadRequest("sold is required".to_string()))?;

    ArtworkRepository::new(state.pool())
        .set_sold(ArtworkId::new(id), sold)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound(format!("artwork {id}")),
            other => AppError::Database(other),
        })?;

    Ok(response::ok_empty())
}

/// Spreadsheet export of the whole catalog.
#[instrument(skip(state, _admin))]
pub async fn export(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Response> {
    let artworks = ArtworkRepository::new(state.pool()).all_for_export().await?;
    let bytes = spreadsheet::export_artworks(&artworks)?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"artworks.xlsx\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Spreadsheet import result counts.
#[derive(Serialize)]
struct ImportResult {
    created: usize,
    updated: usize,
}

/// Spreadsheet import.
///
/// Rows carrying an image path that matches an existing record update that
/// record; all other rows create new pending artworks owned by the
/// importing admin.
#[instrument(skip(state, admin, multipart))]
pub async fn import(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>> {
    let mut file_bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("invalid upload: {e}")))?;
            file_bytes = Some(bytes.to_vec());
        }
    }

    let bytes =
        file_bytes.ok_or_else(|| AppError::BadRequest("file field is required".to_string()))?;
    let rows = spreadsheet::parse_artworks(&bytes)?;

    let repo = ArtworkRepository::new(state.pool());
    let mut created = 0;
    let mut updated = 0;

    for row in rows {
        let existing = match &row.image {
            Some(image) => repo.get_by_image(image).await?,
            None => None,
        };

        let input = ArtworkInput {
            owner_id: existing.as_ref().map_or(admin.id, |a| a.owner_id),
            title: row.title,
            artist_name: row.artist_name,
            description: row.description,
            images: existing.as_ref().map_or_else(
                || row.image.clone().into_iter().collect(),
                |a| a.images.clone(),
            ),
            price: row.price,
            rental_price: row.rental_price,
            category: row.category,
            season: row.season,
            space: row.space,
            width_cm: row.width_cm,
            height_cm: row.height_cm,
        };

        match existing {
            Some(artwork) => {
                repo.update(artwork.id, &input).await?;
                updated += 1;
            }
            None => {
                repo.create(&input).await?;
                created += 1;
            }
        }
    }

    tracing::info!(created, updated, "spreadsheet import finished");
    Ok(response::ok(ImportResult { created, updated }))
}
