//! Error type definitions for phone verification, session tokens and input validation.
//!
//! User-facing wording lives in the presentation layer; the messages here are
//! meant for logs.

use std::collections::HashMap;
use thiserror::Error;

/// Phone verification workflow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("User not found")]
    UserNotFound,

    #[error("Phone number already confirmed")]
    AlreadyConfirmed,

    #[error("Verification code is incorrect or has expired")]
    VerificationFailed,

    #[error("Verification provider unavailable: {message}")]
    ProviderTransport { message: String },

    #[error("Verification code could not be sent")]
    CodeNotSent,

    #[error("Email address already in use")]
    EmailAlreadyInUse,
}

impl VerificationError {
    /// Whether the handler should re-display the form instead of treating the error as fatal
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            VerificationError::VerificationFailed
                | VerificationError::CodeNotSent
                | VerificationError::AlreadyConfirmed
                | VerificationError::EmailAlreadyInUse
        )
    }
}

/// Session token errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        fields: HashMap<String, Vec<String>>,
    },
}
