//! Error types for task board operations
//!
//! Every public engine operation fails closed: a precondition failure aborts
//! before any write, and a mid-sequence storage failure rolls the enclosing
//! transaction back fully.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for board engine operations
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BoardError {
    /// Create a not-found error for a referenced entity
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error means a referenced entity is absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, BoardError::NotFound { .. })
    }
}

/// Result type for board engine operations
pub type BoardResult<T> = Result<T, BoardError>;
