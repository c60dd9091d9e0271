//! # Notely DB
//!
//! PostgreSQL connection pool and schema migrations.
//!
//! The pool is created once at startup and cloned into the application state.
//! If the database cannot be reached the caller is expected to abort startup.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//!
//! # Example
//!
//! ```ignore
//! use notely_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! ```

use std::env;
use std::time::Duration;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

pub use sqlx::PgPool;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Initializes a PostgreSQL connection pool from `DATABASE_URL`.
///
/// # Errors
///
/// Fails if `DATABASE_URL` is not set or the first connection cannot be
/// established.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(max_connections, "Database pool initialized");

    Ok(pool)
}

/// Applies the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations applied");

    Ok(())
}

/// True when `err` is a unique-constraint violation reported by PostgreSQL.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Name of the violated constraint, when the database reported one.
pub fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(violated_constraint(&sqlx::Error::PoolTimedOut).is_none());
    }
}
