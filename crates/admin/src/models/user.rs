//! User domain type as seen by the dashboard.

use chrono::{DateTime, Utc};
use serde::Serialize;

use maru_core::{ApprovalStatus, Email, UserId, UserRole};

/// A user account with management fields.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub phone: Option<String>,
    pub role: UserRole,
    /// Partner vetting status.
    pub approval: ApprovalStatus,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    /// At most one partner is spotlighted at a time.
    pub spotlighted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
