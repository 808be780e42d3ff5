//! # Storage and Persistence
//!
//! Database connectivity and the repositories backing project and
//! credential state. Migrations are embedded in the binary and applied
//! on startup when `auto_migrate` is enabled.

pub mod pool;
pub mod repositories;

pub use pool::{create_pool, DbPool};
pub use repositories::{
    CredentialRepository, NewProject, ProjectRepository, SqlxCredentialRepository,
    SqlxProjectRepository,
};

use crate::errors::{Error, Result};

/// Run embedded database migrations
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        Error::database(sqlx::Error::Migrate(Box::new(e)), "Failed to run database migrations")
    })?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Check database connectivity
pub async fn check_connection(pool: &DbPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| Error::database(e, "Database connectivity check failed"))?;

    Ok(())
}
