//! Error types for the blog.

use thiserror::Error;

/// Common error type for the blog.
#[derive(Error, Debug)]
pub enum BlogError {
    /// Database error.
    ///
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (no principal attached to the request).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error (principal is not the owner).
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BlogError {
    fn from(e: sqlx::Error) -> Self {
        BlogError::Database(e.to_string())
    }
}

/// Result type alias for blog operations.
pub type Result<T> = std::result::Result<T, BlogError>;
