//! User management repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use maru_core::{ApprovalStatus, Email, UserId, UserRole};

use super::RepositoryError;
use crate::models::user::User;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for user queries.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    email: String,
    name: String,
    phone: Option<String>,
    role: UserRole,
    approval: ApprovalStatus,
    bio: Option<String>,
    profile_image: Option<String>,
    spotlighted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            email,
            name: row.name,
            phone: row.phone,
            role: row.role,
            approval: row.approval,
            bio: row.bio,
            profile_image: row.profile_image,
            spotlighted: row.spotlighted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, email, name, phone, role, approval, bio, profile_image, \
     spotlighted, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for user management.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List users, optionally restricted to one role, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list(&self, role: Option<UserRole>) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = if let Some(role) = role {
            sqlx::query_as(&format!(
                "SELECT {USER_COLUMNS} FROM users WHERE role = $1 \
                 ORDER BY created_at DESC, id DESC"
            ))
            .bind(role)
            .fetch_all(self.pool)
            .await?
        } else {
            sqlx::query_as(&format!(
                "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
            ))
            .fetch_all(self.pool)
            .await?
        };

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user together with their password hash, for staff login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            #[sqlx(flatten)]
            user: UserRow,
            password_hash: String,
        }

        let row: Option<Row> = sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Ok((r.user.try_into()?, r.password_hash)))
            .transpose()
    }

    /// Create an account with an explicit role (admin bootstrap, partner
    /// onboarding).
    ///
    /// Admin and customer accounts are approved immediately; partners start
    /// in `pending` vetting.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        name: &str,
        role: UserRole,
    ) -> Result<User, RepositoryError> {
        let approval = if role == UserRole::Partner {
            ApprovalStatus::Pending
        } else {
            ApprovalStatus::Approved
        };

        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (email, password_hash, name, role, approval) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(password_hash)
        .bind(name)
        .bind(role)
        .bind(approval)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Set a partner's vetting status (approve / reject).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn set_approval(
        &self,
        id: UserId,
        approval: ApprovalStatus,
    ) -> Result<User, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET approval = $1, updated_at = NOW() WHERE id = $2 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(approval)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Change a user's role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn update_role(&self, id: UserId, role: UserRole) -> Result<User, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(role)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Update a partner's public profile fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn update_profile(
        &self,
        id: UserId,
        name: &str,
        phone: Option<&str>,
        bio: Option<&str>,
        profile_image: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET name = $1, phone = $2, bio = $3, profile_image = $4, \
                    updated_at = NOW() \
             WHERE id = $5 \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(name)
        .bind(phone)
        .bind(bio)
        .bind(profile_image)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Delete a user.
    ///
    /// Cascades to their artworks, orders, and notifications.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Spotlight one partner, unsetting any other.
    ///
    /// Clear-then-set: two statements without a wrapping transaction; a
    /// concurrent admin action can (rarely) interleave, which is accepted
    /// at this scale.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user isn't an approved
    /// partner.
    pub async fn set_spotlight(&self, id: UserId) -> Result<User, RepositoryError> {
        sqlx::query("UPDATE users SET spotlighted = FALSE, updated_at = NOW() WHERE spotlighted")
            .execute(self.pool)
            .await?;

        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET spotlighted = TRUE, updated_at = NOW() \
             WHERE id = $1 AND role = 'partner' AND approval = 'approved' \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Clear the spotlight entirely.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear_spotlight(&self) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET spotlighted = FALSE, updated_at = NOW() WHERE spotlighted")
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Dashboard count of partners awaiting vetting.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn pending_partner_count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE role = 'partner' AND approval = 'pending'",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
