//! Error types for query source and configuration loading.

use thiserror::Error;

/// Errors that can occur while loading queries or configuration.
#[derive(Debug, Error)]
pub enum QueryError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// No query with the requested name is loaded.
    #[error("unknown query: {0}")]
    UnknownQuery(String),

    /// All configured query sources failed.
    #[error("no query sources available")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`QueryError`].
pub type Result<T> = std::result::Result<T, QueryError>;
