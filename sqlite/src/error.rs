//! Error types for the SQLite backend.
//!
//! Wraps database, query lookup, materialization and validation failures in
//! one enum so callers can report any of them with a single `match`.

use storefront_core::{MaterializeError, ValidationError};
use storefront_db::QueryError;
use thiserror::Error;

/// Errors that can occur while talking to the storefront database.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite database operation failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The SQL for an operation could not be found or loaded.
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// Result rows could not be turned into records.
    #[error("materialization error: {0}")]
    Materialize(#[from] MaterializeError),

    /// Input rejected before reaching the database.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A lookup by id returned no row.
    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The database could not be brought into a usable state.
    #[error("bootstrap error: {0}")]
    Bootstrap(String),
}

/// Convenience alias for results with [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
