//! Unit tests for token service

use chrono::Utc;

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

fn create_test_service() -> TokenService {
    TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        ..TokenServiceConfig::default()
    })
}

fn confirmed_user() -> User {
    let mut user = User::new(
        "Leia".to_string(),
        "leia@example.com".to_string(),
        "hash".to_string(),
        "4155552671".to_string(),
        "1".to_string(),
    );
    user.assign_provider_user_id("authy-1");
    user.confirm_phone_number();
    user
}

#[test]
fn test_issue_and_verify() {
    let service = create_test_service();
    let user = confirmed_user();

    let token = service.issue(&user).unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.email, "leia@example.com");
    assert!(claims.phone_number_confirmed);
    assert_eq!(claims.iss, "account-verification");
}

#[test]
fn test_verify_expired_token() {
    let service = create_test_service();
    let mut claims = Claims::for_user(&confirmed_user(), "account-verification", 60);
    claims.iat = Utc::now().timestamp() - 7200;
    claims.exp = Utc::now().timestamp() - 3600;

    let token = service.encode_jwt(&claims).unwrap();

    assert!(matches!(
        service.verify(&token),
        Err(DomainError::Token(TokenError::TokenExpired))
    ));
}

#[test]
fn test_verify_wrong_secret() {
    let service = create_test_service();
    let other = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..TokenServiceConfig::default()
    });

    let token = other.issue(&confirmed_user()).unwrap();

    assert!(matches!(
        service.verify(&token),
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[test]
fn test_verify_wrong_issuer() {
    let service = create_test_service();
    let claims = Claims::for_user(&confirmed_user(), "someone-else", 60);
    let token = service.encode_jwt(&claims).unwrap();

    assert!(matches!(
        service.verify(&token),
        Err(DomainError::Token(TokenError::InvalidClaims))
    ));
}

#[test]
fn test_verify_garbage() {
    let service = create_test_service();

    assert!(matches!(
        service.verify("not-a-jwt"),
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}
