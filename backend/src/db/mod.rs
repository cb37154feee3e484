//! PostgreSQL pool, embedded migrations and the readiness probe query

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{info, warn};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const APPLICATION_NAME: &str = "ml-fitness-backend";
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Idle connections kept warm, never more than the pool may hold
fn min_connections(max_connections: u32) -> u32 {
    max_connections.min(2)
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = PgConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .application_name(APPLICATION_NAME);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(min_connections(config.max_connections))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .test_before_acquire(true)
        .connect_with(options)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!(max = config.max_connections, "Database pool created");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    MIGRATOR.run(pool).await.context("Migrations failed")?;
    info!(count = MIGRATOR.iter().count(), "Database migrations applied");
    Ok(())
}

/// Round trip to the database, returning how long it took
pub async fn health_check(pool: &PgPool) -> Result<Duration> {
    let started = Instant::now();
    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        warn!(error = %e, "Database health check failed");
        return Err(e.into());
    }
    Ok(started.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_connections_never_exceed_max() {
        assert_eq!(min_connections(10), 2);
        assert_eq!(min_connections(1), 1);
    }

    #[test]
    fn test_migrations_are_embedded() {
        assert!(MIGRATOR.iter().count() >= 1);
    }
}
