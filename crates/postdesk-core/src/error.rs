//! Domain-level error types.

use thiserror::Error;

use crate::domain::BatchViolation;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or missing input, caught before any statement runs.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// One or more batch items failed validation. Carries every violation.
    #[error("Validation errors: {} invalid item(s)", .0.len())]
    InvalidBatch(Vec<BatchViolation>),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    /// The store rejected a statement. Any open transaction was rolled back.
    #[error(transparent)]
    Persistence(#[from] RepoError),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl RepoError {
    /// The driver message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Connection(msg) | Self::Query(msg) | Self::Constraint(msg) => msg,
        }
    }
}
