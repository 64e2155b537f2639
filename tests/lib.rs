//! Shared fixtures for the cross-crate database tests.

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};

/// Fresh migrated in-memory SQLite database.
pub async fn sqlite_pool() -> Result<DbPool> {
    migrated(&DatabaseSettings::default()).await
}

/// Migrated Postgres pool from `TEST_DATABASE_URL`, or `None` when unset.
pub async fn postgres_pool() -> Result<Option<DbPool>> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        return Ok(None);
    };
    migrated(&DatabaseSettings::new(url)).await.map(Some)
}

async fn migrated(settings: &DatabaseSettings) -> Result<DbPool> {
    let pool = connect(settings)
        .await
        .with_context(|| format!("connect to {}", settings.url))?;
    Migrator::up(&pool, None).await.context("run migrations")?;
    Ok(pool)
}
