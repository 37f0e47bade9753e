//! PostgreSQL persistence layer for crewdesk.
//!
//! Owns pool construction, embedded migrations, the entity models, and one
//! repository per table. Cascade policy lives in the migration DDL: deleting
//! a project or a parent task propagates through `ON DELETE CASCADE`
//! constraints in a single atomic statement, never through application-level
//! row loops.

pub mod models;
pub mod repositories;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// Connection pool alias used by the API state.
pub type DbPool = sqlx::PgPool;

/// Embedded migrations, applied at startup and by `#[sqlx::test]`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Create the connection pool.
///
/// Acquisition is bounded so a saturated pool surfaces as a timeout error
/// (classified as unavailable upstream) instead of a hung request.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Applying database migrations");
    MIGRATOR.run(pool).await
}
