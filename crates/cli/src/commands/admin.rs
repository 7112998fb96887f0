//! Staff account creation command.

use maru_admin::db::users::UserRepository;
use maru_admin::services::auth::hash_password;
use maru_core::{Email, UserRole};

use super::{CommandError, connect};

/// Create a staff account with a password.
///
/// # Errors
///
/// Returns an error for invalid input, duplicate emails, or database
/// failures.
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
    role: &str,
) -> Result<(), CommandError> {
    let email = Email::parse(email).map_err(|e| CommandError::Invalid(e.to_string()))?;
    let role: UserRole = role.parse().map_err(CommandError::Invalid)?;
    if role == UserRole::User {
        return Err(CommandError::Invalid(
            "use the storefront to register customer accounts".to_owned(),
        ));
    }
    if password.len() < 8 {
        return Err(CommandError::Invalid(
            "password must be at least 8 characters".to_owned(),
        ));
    }

    let password_hash =
        hash_password(password).map_err(|e| CommandError::Invalid(e.to_string()))?;

    let pool = connect().await?;
    let user = UserRepository::new(&pool)
        .create(&email, &password_hash, name, role)
        .await
        .map_err(|e| CommandError::Invalid(e.to_string()))?;

    tracing::info!(user_id = %user.id, role = %user.role, "staff account created");
    Ok(())
}
