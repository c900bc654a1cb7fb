//! Postgres pool construction and schema migrations.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::DbError;

/// Type alias for the shared Postgres pool handed to the repository functions.
pub type DbPool = PgPool;

/// Where and how to connect.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// Seconds to wait for a free connection before giving up.
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    /// `max_connections` 5, `acquire_timeout_secs` 30.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
            acquire_timeout_secs: 30,
        }
    }
}

pub async fn create_pool(config: &DbConfig) -> Result<DbPool, DbError> {
    info!(
        max_connections = config.max_connections,
        "Connecting to jobs database"
    );
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Create the `companies` and `jobs` tables from the migrations embedded at
/// build time (`<workspace>/migrations`).
pub async fn run_migrations(pool: &DbPool) -> Result<(), DbError> {
    info!("Running jobs schema migrations");
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_apply_when_only_the_url_is_given() {
        let config = DbConfig::new("postgres://localhost/jobly");
        assert_eq!(config.database_url, "postgres://localhost/jobly");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout_secs, 30);
    }
}
