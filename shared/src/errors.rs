//! Error types shared by the domain modules

use thiserror::Error;

/// Errors raised by pure domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Duplicate(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
