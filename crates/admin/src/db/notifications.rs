//! Notification writes (moderation / order fan-out) and staff reads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use maru_core::{ArtworkId, NotificationId, NotificationKind, UserId};

use super::RepositoryError;

/// A notification as shown in the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub artwork_id: Option<ArtworkId>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: i32,
    kind: NotificationKind,
    message: String,
    artwork_id: Option<i32>,
    read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: NotificationId::new(row.id),
            kind: row.kind,
            message: row.message,
            artwork_id: row.artwork_id.map(ArtworkId::new),
            read: row.read,
            created_at: row.created_at,
        }
    }
}

/// Repository for notification writes and staff reads.
pub struct NotificationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationRepository<'a> {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Write one notification record for a recipient.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn notify(
        &self,
        recipient: UserId,
        kind: NotificationKind,
        message: &str,
        artwork_id: Option<ArtworkId>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO notifications (recipient_id, kind, message, artwork_id) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(recipient.as_i32())
        .bind(kind)
        .bind(message)
        .bind(artwork_id.map(|id| id.as_i32()))
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Recent notifications for the logged-in staff member.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<Notification>, RepositoryError> {
        let rows: Vec<NotificationRow> = sqlx::query_as(
            "SELECT id, kind, message, artwork_id, read, created_at \
             FROM notifications WHERE recipient_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2",
        )
        .bind(user_id.as_i32())
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    /// Mark one notification read, scoped to its recipient.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the notification doesn't exist
    /// or belongs to someone else.
    pub async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE notifications SET read = TRUE WHERE id = $1 AND recipient_id = $2",
        )
        .bind(id.as_i32())
        .bind(user_id.as_i32())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Mark all of a staff member's notifications read.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn mark_all_read(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE notifications SET read = TRUE WHERE recipient_id = $1 AND NOT read")
            .bind(user_id.as_i32())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
