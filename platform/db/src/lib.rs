//! Database primitives: connection settings and pool setup.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use thiserror::Error;
use tracing::info;

/// Shared connection pool alias.
pub type DbPool = DatabaseConnection;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

const IN_MEMORY_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

#[derive(Debug, Error)]
pub enum DbError {
    #[error("invalid DATABASE_MAX_CONNECTIONS value `{0}`")]
    InvalidMaxConnections(String),
    #[error("database connection failed: {0}")]
    Connect(#[from] DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven connection settings.
#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

impl DatabaseSettings {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: None,
        }
    }

    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`.
    pub fn from_env() -> DbResult<Self> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());
        let max_connections = match std::env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| DbError::InvalidMaxConnections(raw))?,
            ),
            Err(_) => None,
        };
        Ok(Self {
            url,
            max_connections,
        })
    }

    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }

    pub fn is_in_memory(&self) -> bool {
        self.is_sqlite() && (self.url.contains(":memory:") || self.url.contains("mode=memory"))
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        options.sqlx_logging(false);
        if self.is_in_memory() {
            // Every in-memory SQLite connection is a separate database, so the
            // pool must hold exactly one and never recycle it.
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(IN_MEMORY_LIFETIME)
                .max_lifetime(IN_MEMORY_LIFETIME);
        } else if let Some(max) = self.max_connections {
            options.max_connections(max);
        }
        options
    }
}

pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let pool = Database::connect(settings.connect_options()).await?;
    info!(backend = ?pool.get_database_backend(), "database connected");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_sqlite() {
        assert!(DatabaseSettings::default().is_in_memory());
        assert!(DatabaseSettings::new("sqlite:file:test?mode=memory&cache=shared").is_in_memory());
        assert!(!DatabaseSettings::new("sqlite://employees.db?mode=rwc").is_in_memory());
        assert!(!DatabaseSettings::new("postgres://localhost/employees").is_sqlite());
    }
}
