//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created
//! once at startup and shared by reference with every repository; nothing
//! in this crate holds global connection state.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use crate::config::DbConfig;
use crate::error::Result;

/// Default maximum connections for the pool.
/// Kept low; a single web process rarely needs more.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/staybnb").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `database_url` - PostgreSQL connection string
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Create a pool from resolved [`DbConfig`].
pub async fn connect(config: &DbConfig) -> Result<PgPool> {
    debug!(
        "Connecting to database (max_connections={})",
        config.max_connections
    );
    Ok(create_pool_with_options(&config.database_url, config.max_connections).await?)
}
