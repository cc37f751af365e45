//! Error types for the K-portal API.

use thiserror::Error;

/// Result type alias using the K-portal Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for K-portal operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error. The message is safe to show to API clients.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the error originates from the data store.
    pub fn is_database(&self) -> bool {
        matches!(self, Error::Database(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("news 42".to_string());
        assert_eq!(err.to_string(), "Not found: news 42");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("limit must be an integer".to_string());
        assert_eq!(err.to_string(), "Invalid input: limit must be an integer");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("PORT is not a number".to_string());
        assert_eq!(err.to_string(), "Configuration error: PORT is not a number");
    }

    #[test]
    fn test_error_display_internal() {
        let err = Error::Internal("no members".to_string());
        assert_eq!(err.to_string(), "Internal error: no members");
    }

    #[test]
    fn test_from_sqlx_error() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(err.is_database());
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_non_database_errors() {
        assert!(!Error::NotFound("x".into()).is_database());
        assert!(!Error::Internal("x".into()).is_database());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
