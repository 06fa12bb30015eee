//! Environment-driven database configuration

use tracing::{debug, info};

use crate::error::{DbError, Result};
use crate::pool::DEFAULT_MAX_CONNECTIONS;

/// Environment variable holding the PostgreSQL connection string
const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable overriding the pool size
const MAX_CONNECTIONS_VAR: &str = "DATABASE_MAX_CONNECTIONS";

/// Connection settings for the staybnb database
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL connection string (e.g. `postgres://localhost/staybnb`)
    pub database_url: String,
    /// Maximum number of connections held by the pool
    pub max_connections: u32,
}

impl DbConfig {
    /// Load configuration from the environment.
    ///
    /// A `.env` file in the current directory is read first; variables
    /// already set in the process environment win (dotenvy doesn't
    /// overwrite existing vars). `DATABASE_URL` is required,
    /// `DATABASE_MAX_CONNECTIONS` is optional and defaults to
    /// [`DEFAULT_MAX_CONNECTIONS`].
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded .env from: {}", path.display());
        }

        let database_url = std::env::var(DATABASE_URL_VAR)
            .map_err(|_| DbError::config(format!("{} not set", DATABASE_URL_VAR)))?;

        let max_connections = match std::env::var(MAX_CONNECTIONS_VAR) {
            Ok(raw) => raw.parse().map_err(|_| {
                DbError::config(format!("{} is not a number: '{}'", MAX_CONNECTIONS_VAR, raw))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        info!(
            "Database configuration loaded (max_connections={})",
            max_connections
        );

        Ok(Self {
            database_url,
            max_connections,
        })
    }
}
