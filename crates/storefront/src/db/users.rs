//! User repository for customer accounts and public artist profiles.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use maru_core::{ApprovalStatus, Email, UserId, UserRole};

use super::RepositoryError;
use crate::models::user::{ArtistProfile, User};

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
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Internal row type for artist profile queries.
#[derive(Debug, sqlx::FromRow)]
struct ArtistRow {
    id: i32,
    name: String,
    bio: Option<String>,
    profile_image: Option<String>,
}

impl From<ArtistRow> for ArtistProfile {
    fn from(row: ArtistRow) -> Self {
        Self {
            id: UserId::new(row.id),
            name: row.name,
            bio: row.bio,
            profile_image: row.profile_image,
        }
    }
}

const USER_COLUMNS: &str = "id, email, name, phone, role, approval, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations on the storefront side.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
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

    /// Get a user by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email.as_str())
                .fetch_optional(self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user together with their password hash, for login.
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

    /// Create a new customer account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_customer(
        &self,
        email: &Email,
        password_hash: &str,
        name: &str,
        phone: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (email, password_hash, name, phone, role, approval) \
             VALUES ($1, $2, $3, $4, 'user', 'approved') \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(password_hash)
        .bind(name)
        .bind(phone)
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

    /// The currently spotlighted artist, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn spotlight_artist(&self) -> Result<Option<ArtistProfile>, RepositoryError> {
        let row: Option<ArtistRow> = sqlx::query_as(
            "SELECT id, name, bio, profile_image FROM users \
             WHERE spotlighted AND role = 'partner' AND approval = 'approved' \
             ORDER BY updated_at DESC LIMIT 1",
        )
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ArtistProfile::from))
    }

    /// All approved artist partners, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_artists(&self) -> Result<Vec<ArtistProfile>, RepositoryError> {
        let rows: Vec<ArtistRow> = sqlx::query_as(
            "SELECT id, name, bio, profile_image FROM users \
             WHERE role = 'partner' AND approval = 'approved' \
             ORDER BY name ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(ArtistProfile::from).collect())
    }

    /// One approved artist partner's public profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_artist(&self, id: UserId) -> Result<Option<ArtistProfile>, RepositoryError> {
        let row: Option<ArtistRow> = sqlx::query_as(
            "SELECT id, name, bio, profile_image FROM users \
             WHERE id = $1 AND role = 'partner' AND approval = 'approved'",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(ArtistProfile::from))
    }
}
