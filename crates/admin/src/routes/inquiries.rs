//! Inquiry management handlers (admin).

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use maru_core::{InquiryId, InquiryStatus};

use crate::db::{InquiryRepository, RepositoryError};
use crate::db::inquiries::Inquiry;
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdmin;
use crate::response;
use crate::state::AppState;

/// Listing parameters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// new | in_progress | resolved
    pub status: Option<String>,
}

/// List inquiries, optionally by status.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>> {
    let status = params.status.as_deref().and_then(|s| s.parse().ok());
    let inquiries = InquiryRepository::new(state.pool()).list(status).await?;

    #[derive(Serialize)]
    struct Inquiries {
        inquiries: Vec<Inquiry>,
    }

    Ok(response::ok(Inquiries { inquiries }))
}

/// Status change form.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: Option<String>,
}

/// Set an inquiry's handling status.
#[instrument(skip(state, _admin, form))]
pub async fn set_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<StatusForm>,
) -> Result<Json<Value>> {
    let status: InquiryStatus = form
        .status
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("status is required".to_string()))?
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    let inquiry = InquiryRepository::new(state.pool())
        .set_status(InquiryId::new(id), status)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound(format!("inquiry {id}")),
            other => AppError::Database(other),
        })?;

    #[derive(Serialize)]
    struct OneInquiry {
        inquiry: Inquiry,
    }

    Ok(response::ok(OneInquiry { inquiry }))
}
