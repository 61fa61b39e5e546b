//! # Database Migrations
//!
//! Schema migrations live in `migrations/` using sqlx's timestamped naming
//! (`YYYYMMDDHHMMSS_description.sql`) and are embedded into the binary at
//! compile time. Applied versions are tracked in `_sqlx_migrations`, so
//! running them repeatedly is safe.

use sqlx::migrate::Migrator;
use sqlx::PgPool;
use tracing::info;

use crate::error::Result;

/// Embedded migrator over the crate's `migrations/` directory.
/// Use in tests with: `#[sqlx::test(migrator = "workforce_core::database::MIGRATOR")]`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub struct DatabaseMigrations;

impl DatabaseMigrations {
    /// Apply every outstanding migration
    pub async fn run_all(pool: &PgPool) -> Result<()> {
        let known = MIGRATOR.iter().count();
        info!(migration_count = known, "Running database migrations");
        MIGRATOR.run(pool).await?;
        info!("Database schema is up to date");
        Ok(())
    }
}
