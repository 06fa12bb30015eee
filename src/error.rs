//! Error types for the staybnb data-access layer

use thiserror::Error;

/// Result type alias defaulting to [`DbError`]
pub type Result<T, E = DbError> = std::result::Result<T, E>;

/// Errors surfaced by the data-access layer.
///
/// "No such row" is not an error: lookups return `Ok(None)` and list
/// queries return an empty `Vec`. An `Err` always means the query itself
/// failed to execute.
#[derive(Error, Debug)]
pub enum DbError {
    /// Query execution failed (connectivity, SQL error, pool exhaustion)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// An insert violated a unique constraint
    #[error("duplicate {field}: '{value}' already exists")]
    Duplicate { field: &'static str, value: String },

    /// Missing or malformed environment configuration
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl DbError {
    /// Create a duplicate-key error
    pub fn duplicate(field: &'static str, value: impl Into<String>) -> Self {
        Self::Duplicate {
            field,
            value: value.into(),
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
