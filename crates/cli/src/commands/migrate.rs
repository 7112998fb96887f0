//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! maru-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string (the per-binary
//!   `ADMIN_DATABASE_URL` / `STOREFRONT_DATABASE_URL` work as fallbacks)
//!
//! Migration files live in `migrations/` at the workspace root.

use super::{CommandError, connect};

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../../migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
