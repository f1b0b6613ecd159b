//! Common error types for stockcull

use thiserror::Error;

/// Common result type for stockcull operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the stockcull tools
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog source file parse error (wraps csv::Error)
    #[error("Catalog error: {0}")]
    Catalog(#[from] csv::Error),

    /// Decision file encode/decode error (wraps serde_json::Error)
    #[error("Decision file error: {0}")]
    DecisionFile(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
