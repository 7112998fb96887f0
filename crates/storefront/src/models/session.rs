//! Session-stored types and keys.

use serde::{Deserialize, Serialize};

use maru_core::{UserId, UserRole};

/// Session keys used by the storefront.
pub mod session_keys {
    /// The logged-in customer.
    pub const CURRENT_USER: &str = "current_user";
}

/// The authenticated user as stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}
