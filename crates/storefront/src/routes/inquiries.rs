//! Public inquiry submission handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use maru_core::{ArtworkId, InquiryKind};

use crate::db::{InquiryRepository, NotificationRepository};
use crate::db::inquiries::NewInquiry;
use crate::error::{AppError, Result};
use crate::response;
use crate::state::AppState;

/// Inquiry form fields.
#[derive(Debug, Deserialize)]
pub struct InquiryForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// purchase | rental | consignment | general; anything else falls back
    /// to general.
    pub kind: Option<String>,
    pub message: Option<String>,
    pub artwork_id: Option<i32>,
}

/// Require a non-blank form field.
fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{field} is required")))
}

/// Parse the inquiry kind, falling back to `general` for unknown values.
fn parse_kind(value: Option<&str>) -> InquiryKind {
    match value {
        Some("purchase") => InquiryKind::Purchase,
        Some("rental") => InquiryKind::Rental,
        Some("consignment") => InquiryKind::Consignment,
        _ => InquiryKind::General,
    }
}

/// Submit an inquiry.
///
/// Writes the inquiry, fans a notification out to every admin, and emails
/// the gallery desk when SMTP is configured. The side effects are
/// best-effort; only the inquiry write itself can fail the request.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<InquiryForm>,
) -> Result<Json<Value>> {
    let name = required(form.name, "name")?;
    let email = required(form.email, "email")?;
    let message = required(form.message, "message")?;

    let new_inquiry = NewInquiry {
        name,
        email,
        phone: form.phone.filter(|p| !p.trim().is_empty()),
        kind: parse_kind(form.kind.as_deref()),
        message,
        artwork_id: form.artwork_id.map(ArtworkId::new),
    };

    let inquiry = InquiryRepository::new(state.pool())
        .create(&new_inquiry)
        .await?;

    // Notification fan-out to admins (best-effort).
    let summary = format!("New inquiry from {} ({})", inquiry.name, inquiry.email);
    if let Err(e) = NotificationRepository::new(state.pool())
        .notify_admins_of_inquiry(&summary, inquiry.artwork_id)
        .await
    {
        tracing::warn!(error = %e, "Failed to fan out inquiry notification");
    }

    // Staff email alert (best-effort).
    if let Some(mailer) = state.mailer()
        && let Err(e) = mailer.send_inquiry_alert(&inquiry).await
    {
        tracing::warn!(error = %e, "Failed to send inquiry alert email");
    }

    #[derive(serde::Serialize)]
    struct Created {
        inquiry: crate::db::inquiries::Inquiry,
    }

    Ok(response::ok(Created { inquiry }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_missing_and_blank() {
        assert!(required(None, "name").is_err());
        assert!(required(Some("   ".to_string()), "name").is_err());
        assert_eq!(required(Some(" Kim ".to_string()), "name").ok(), Some("Kim".to_string()));
    }

    #[test]
    fn test_parse_kind_is_permissive() {
        assert_eq!(parse_kind(Some("purchase")), InquiryKind::Purchase);
        assert_eq!(parse_kind(Some("rental")), InquiryKind::Rental);
        assert_eq!(parse_kind(Some("gibberish")), InquiryKind::General);
        assert_eq!(parse_kind(None), InquiryKind::General);
    }
}
