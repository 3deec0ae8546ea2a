//! Domain errors for the pmos routing pipeline.

use thiserror::Error;

/// Domain-level errors that can occur in the pmos system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Model call failed: {0}")]
    ModelCallFailed(String),

    #[error("Knowledge retrieval failed: {0}")]
    RetrievalFailed(String),

    #[error("Invalid workflow rules: {0}")]
    InvalidRules(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
