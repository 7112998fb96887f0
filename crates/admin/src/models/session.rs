//! Session-stored types and keys.

use serde::{Deserialize, Serialize};

use maru_core::{UserId, UserRole};

/// Session keys used by the dashboard.
pub mod session_keys {
    /// The logged-in staff member (admin or partner).
    pub const CURRENT_STAFF: &str = "current_staff";
}

/// The authenticated staff member as stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentStaff {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl CurrentStaff {
    /// Whether this staff member has full admin access.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
