//! Staff authentication extractors.
//!
//! `RequireStaff` admits admins and approved partners; `RequireAdmin`
//! admits admins only. Partner-scoped data checks (own artworks only)
//! happen in the handlers.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use maru_core::UserRole;

use crate::models::{CurrentStaff, session_keys};

/// Extractor that requires a logged-in staff member (admin or partner).
pub struct RequireStaff(pub CurrentStaff);

/// Extractor that requires a logged-in admin.
pub struct RequireAdmin(pub CurrentStaff);

/// Error returned when staff authentication fails.
pub enum StaffRejection {
    /// Not logged in.
    Unauthorized,
    /// Logged in, but the role does not allow this resource.
    Forbidden,
}

impl IntoResponse for StaffRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "login required"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "admin access required"),
        };
        (
            status,
            Json(json!({ "success": false, "error": message })),
        )
            .into_response()
    }
}

/// Read the staff member from the session.
async fn staff_from_parts(parts: &mut Parts) -> Result<CurrentStaff, StaffRejection> {
    let session = parts
        .extensions
        .get::<Session>()
        .ok_or(StaffRejection::Unauthorized)?;

    session
        .get(session_keys::CURRENT_STAFF)
        .await
        .ok()
        .flatten()
        .ok_or(StaffRejection::Unauthorized)
}

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = StaffRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff = staff_from_parts(parts).await?;
        match staff.role {
            UserRole::Admin | UserRole::Partner => Ok(Self(staff)),
            UserRole::User => Err(StaffRejection::Forbidden),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = StaffRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff = staff_from_parts(parts).await?;
        if staff.role != UserRole::Admin {
            return Err(StaffRejection::Forbidden);
        }
        Ok(Self(staff))
    }
}

/// Helper to set the current staff member in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_staff(
    session: &Session,
    staff: &CurrentStaff,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_STAFF, staff).await
}

/// Helper to clear the current staff member from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_staff(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentStaff>(session_keys::CURRENT_STAFF)
        .await?;
    Ok(())
}
