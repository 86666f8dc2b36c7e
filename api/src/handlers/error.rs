//! Maps domain errors to HTTP responses
//!
//! Every failing endpoint answers with an `ErrorResponse` body. Messages are
//! written for the person filling in the form; the underlying error goes to
//! the log.

use std::collections::HashMap;

use actix_web::{http::StatusCode, HttpResponse};
use av_core::errors::{DomainError, TokenError, ValidationError, VerificationError};

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// HTTP status for a domain error
pub fn status_code_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Verification(e) => match e {
            VerificationError::UserNotFound => StatusCode::NOT_FOUND,
            VerificationError::AlreadyConfirmed => StatusCode::CONFLICT,
            VerificationError::VerificationFailed => StatusCode::BAD_REQUEST,
            VerificationError::ProviderTransport { .. } => StatusCode::BAD_GATEWAY,
            VerificationError::CodeNotSent => StatusCode::SERVICE_UNAVAILABLE,
            VerificationError::EmailAlreadyInUse => StatusCode::CONFLICT,
        },
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
        DomainError::Token(TokenError::TokenGenerationFailed) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn verification_body(error: &VerificationError) -> ErrorResponse {
    match error {
        VerificationError::UserNotFound => ErrorResponse::new(
            "user_not_found",
            "No account is registered with this email address",
        ),
        VerificationError::AlreadyConfirmed => ErrorResponse::new(
            "already_confirmed",
            "This phone number has already been confirmed",
        ),
        VerificationError::VerificationFailed => ErrorResponse::new(
            "verification_failed",
            "Verification code is incorrect or has expired",
        ),
        VerificationError::ProviderTransport { .. } => ErrorResponse::new(
            "provider_unavailable",
            "The verification service is unavailable. Please try again later",
        ),
        VerificationError::CodeNotSent => ErrorResponse::new(
            "code_not_sent",
            "We could not send a verification code. Please request a new one",
        ),
        VerificationError::EmailAlreadyInUse => ErrorResponse::new(
            "email_already_in_use",
            "An account with this email address already exists",
        ),
    }
}

fn validation_body(error: &ValidationError) -> ErrorResponse {
    match error {
        ValidationError::InvalidInput { message, fields } => {
            ErrorResponse::new("validation_error", message.clone()).with_details(
                fields
                    .iter()
                    .map(|(field, messages)| (field.clone(), serde_json::json!(messages)))
                    .collect(),
            )
        }
        ValidationError::RequiredField { field } => ErrorResponse::new(
            "validation_error",
            format!("Field '{}' is required", field),
        ),
        ValidationError::InvalidFormat { field } => ErrorResponse::new(
            "validation_error",
            format!("Field '{}' has an invalid format", field),
        ),
        ValidationError::InvalidEmail => {
            ErrorResponse::new("validation_error", "Email address is invalid")
        }
    }
}

fn token_body(error: &TokenError) -> ErrorResponse {
    match error {
        TokenError::TokenExpired => {
            ErrorResponse::new("token_expired", "Session has expired. Please sign in again")
        }
        TokenError::TokenGenerationFailed => {
            ErrorResponse::new("internal_error", "An internal error occurred")
        }
        _ => ErrorResponse::new("invalid_token", "Session token is invalid"),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_code_for(error);

    let body = match error {
        DomainError::Verification(e) => verification_body(e),
        DomainError::ValidationErr(e) => validation_body(e),
        DomainError::Token(e) => token_body(e),
        DomainError::Validation { message } => {
            ErrorResponse::new("validation_error", message.clone())
        }
        DomainError::NotFound { resource } => {
            ErrorResponse::new("not_found", format!("{} not found", resource))
        }
        DomainError::Unauthorized => {
            ErrorResponse::new("unauthorized", "Authentication required")
        }
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            ErrorResponse::new("internal_error", "An internal error occurred")
        }
    };

    match error {
        DomainError::Verification(VerificationError::UserNotFound)
        | DomainError::Verification(VerificationError::ProviderTransport { .. }) => {
            tracing::error!(error = %error, status = status.as_u16(), "Request failed");
        }
        _ if status.is_server_error() => {
            tracing::error!(error = %error, status = status.as_u16(), "Request failed");
        }
        _ => {
            tracing::warn!(error = %error, status = status.as_u16(), "Request rejected");
        }
    }

    body.to_response(status)
}

/// Convert request body validation failures into a 400 response with per-field messages
pub fn handle_validation_errors(errors: &validator::ValidationErrors) -> HttpResponse {
    let details: HashMap<String, serde_json::Value> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), serde_json::json!(messages))
        })
        .collect();

    tracing::warn!(fields = ?details.keys().collect::<Vec<_>>(), "Request validation failed");

    ErrorResponse::new("validation_error", "Invalid request data")
        .with_details(details)
        .to_response(StatusCode::BAD_REQUEST)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_status_codes() {
        let cases = [
            (VerificationError::UserNotFound, 404),
            (VerificationError::AlreadyConfirmed, 409),
            (VerificationError::VerificationFailed, 400),
            (
                VerificationError::ProviderTransport {
                    message: "timeout".to_string(),
                },
                502,
            ),
            (VerificationError::CodeNotSent, 503),
            (VerificationError::EmailAlreadyInUse, 409),
        ];

        for (error, expected) in cases {
            let error = DomainError::from(error);
            assert_eq!(status_code_for(&error).as_u16(), expected, "{}", error);
        }
    }

    #[test]
    fn test_token_and_internal_status_codes() {
        assert_eq!(
            status_code_for(&DomainError::Token(TokenError::TokenExpired)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_code_for(&DomainError::Token(TokenError::TokenGenerationFailed)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_code_for(&DomainError::Database {
                message: "down".to_string()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_internal_details_are_not_exposed() {
        let response = handle_domain_error(&DomainError::Database {
            message: "password=hunter2".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("internal_error"));
        assert!(!body.contains("hunter2"));
    }

    #[actix_web::test]
    async fn test_invalid_input_carries_field_details() {
        let mut fields = HashMap::new();
        fields.insert("email".to_string(), vec!["Invalid email".to_string()]);
        let error = DomainError::from(ValidationError::InvalidInput {
            message: "Registration data is invalid".to_string(),
            fields,
        });

        let response = handle_domain_error(&error);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["details"]["email"][0], "Invalid email");
    }
}
