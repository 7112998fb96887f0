//! Visitor inquiry submission.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use maru_core::{ArtworkId, InquiryId, InquiryKind, InquiryStatus};

use super::RepositoryError;

/// A submitted inquiry (domain type).
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

/// Fields accepted from the public inquiry form.
#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub kind: InquiryKind,
    pub message: String,
    pub artwork_id: Option<ArtworkId>,
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

/// Repository for inquiry submission.
pub struct InquiryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InquiryRepository<'a> {
    /// Create a new inquiry repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a new inquiry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, inquiry: &NewInquiry) -> Result<Inquiry, RepositoryError> {
        let row: InquiryRow = sqlx::query_as(
            "INSERT INTO inquiries (name, email, phone, kind, message, artwork_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, name, email, phone, kind, message, artwork_id, status, created_at",
        )
        .bind(&inquiry.name)
        .bind(&inquiry.email)
        .bind(&inquiry.phone)
        .bind(inquiry.kind)
        .bind(&inquiry.message)
        .bind(inquiry.artwork_id.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }
}
