//! Inquiry management repository.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use maru_core::{ArtworkId, InquiryId, InquiryKind, InquiryStatus};

use super::RepositoryError;

/// An inquiry as seen by staff.
#[derive(Debug, Clone, Serialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub kind: InquiryKind,
    pub message: String,
    pub artwork_id: Option<ArtworkId>,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct InquiryRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    kind: InquiryKind,
    message: String,
    artwork_id: Option<i32>,
    status: InquiryStatus,
    created_at: DateTime<Utc>,
}

impl From<InquiryRow> for Inquiry {
    fn from(row: InquiryRow) -> Self {
        Self {
            id: InquiryId::new(row.id),
            name: row.name,
            email: row.email,
            phone: row.phone,
            kind: row.kind,
            message: row.message,
            artwork_id: row.artwork_id.map(ArtworkId::new),
            status: row.status,
            created_at: row.created_at,
        }
    }
}

const INQUIRY_COLUMNS: &str =
    "id, name, email, phone, kind, message, artwork_id, status, created_at";

/// Repository for inquiry management.
pub struct InquiryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InquiryRepository<'a> {
    /// Create a new inquiry repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List inquiries, optionally by status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, status: Option<InquiryStatus>) -> Result<Vec<Inquiry>, RepositoryError> {
        let rows: Vec<InquiryRow> = if let Some(status) = status {
            sqlx::query_as(&format!(
                "SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE status = $1 \
                 ORDER BY created_at DESC, id DESC"
            ))
            .bind(status)
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as(&format!(
                "SELECT {INQUIRY_COLUMNS} FROM inquiries ORDER BY created_at DESC, id DESC"
            ))
            .fetch_all(self.pool)
            .await?
        };

        Ok(rows.into_iter().map(Inquiry::from).collect())
    }

    /// Set an inquiry's handling status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the inquiry doesn't exist.
    pub async fn set_status(
        &self,
        id: InquiryId,
        status: InquiryStatus,
    ) -> Result<Inquiry, RepositoryError> {
        let row: Option<InquiryRow> = sqlx::query_as(&format!(
            "UPDATE inquiries SET status = $1, updated_at = NOW() WHERE id = $2 \
             RETURNING {INQUIRY_COLUMNS}"
        ))
        .bind(status)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Inquiry::from).ok_or(RepositoryError::NotFound)
    }

    /// Dashboard count of untouched inquiries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn new_count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inquiries WHERE status = 'new'")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
