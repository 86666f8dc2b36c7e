//! Unit tests for domain error classification

use std::collections::HashMap;

use crate::errors::{DomainError, TokenError, ValidationError, VerificationError};

#[test]
fn test_verification_error_conversion() {
    let error: DomainError = VerificationError::UserNotFound.into();
    assert_eq!(error.as_verification(), Some(&VerificationError::UserNotFound));
    assert_eq!(error.to_string(), "User not found");
}

#[test]
fn test_recoverable_errors() {
    assert!(DomainError::from(VerificationError::VerificationFailed).is_recoverable());
    assert!(DomainError::from(VerificationError::CodeNotSent).is_recoverable());
    assert!(DomainError::Validation { message: "bad".into() }.is_recoverable());
}

#[test]
fn test_fatal_errors() {
    assert!(!DomainError::from(VerificationError::UserNotFound).is_recoverable());
    let transport = VerificationError::ProviderTransport {
        message: "connection reset".into(),
    };
    assert!(!DomainError::from(transport).is_recoverable());
    assert!(!DomainError::from(TokenError::TokenExpired).is_recoverable());
}

#[test]
fn test_transport_message_is_kept() {
    let error = DomainError::from(VerificationError::ProviderTransport {
        message: "HTTP 503".into(),
    });
    assert!(error.to_string().contains("HTTP 503"));
}

#[test]
fn test_invalid_input_display() {
    let mut fields = HashMap::new();
    fields.insert("email".to_string(), vec!["Email is invalid".to_string()]);
    let error = ValidationError::InvalidInput {
        message: "email: Email is invalid".to_string(),
        fields,
    };
    assert_eq!(error.to_string(), "Invalid input: email: Email is invalid");
}
