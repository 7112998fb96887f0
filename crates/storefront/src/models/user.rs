//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use maru_core::{ApprovalStatus, Email, UserId, UserRole};

/// A user account (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// The user's email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Account role.
    pub role: UserRole,
    /// Partner vetting status; customers are approved on signup.
    pub approval: ApprovalStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Public profile of an artist partner.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistProfile {
    pub id: UserId,
    pub name: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}
