//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{TokenError, ValidationError, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// The verification error carried by this error, if any
    pub fn as_verification(&self) -> Option<&VerificationError> {
        match self {
            DomainError::Verification(e) => Some(e),
            _ => None,
        }
    }

    /// Errors that the caller can recover from by asking the user to try again
    pub fn is_recoverable(&self) -> bool {
        match self {
            DomainError::Verification(e) => e.is_recoverable(),
            DomainError::Validation { .. } | DomainError::ValidationErr(_) => true,
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
