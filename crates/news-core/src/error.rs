//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    /// A write referenced a user (or other entity) that does not exist.
    #[error("{entity} with id {id} does not exist")]
    Reference { entity: &'static str, id: String },

    #[error("Concurrent modification: {0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn reference(entity: &'static str, id: impl ToString) -> Self {
        Self::Reference {
            entity,
            id: id.to_string(),
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    /// A conditional write saw a different revision than the caller expected.
    #[error("Revision mismatch: expected {expected}, found {actual}")]
    Conflict { expected: i64, actual: i64 },

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
