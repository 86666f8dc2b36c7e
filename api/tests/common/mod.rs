#![allow(dead_code)]

//! Shared fixtures for the API integration tests

use std::sync::Arc;

use actix_web::web;
use av_api::routes::account::AppState;
use av_core::repositories::InMemoryUserRepository;
use av_core::services::{
    AccountService, AccountServiceConfig, TokenService, TokenServiceConfig, VerificationService,
    VerificationServiceConfig,
};
use av_infra::otp::MockOtpProvider;
use av_infra::sms::{MockSmsService, SmsNotifierAdapter};
use serde_json::{json, Value};

pub type TestState = AppState<InMemoryUserRepository, MockOtpProvider, SmsNotifierAdapter>;

/// Services wired the way `main` wires them, with handles on the mocks
pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<InMemoryUserRepository>,
    pub otp: MockOtpProvider,
    pub sms: MockSmsService,
    pub token_service: Arc<TokenService>,
}

pub fn context() -> TestContext {
    context_with(MockOtpProvider::new(), MockSmsService::new())
}

pub fn context_with(otp: MockOtpProvider, sms: MockSmsService) -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: "test-secret".to_string(),
        ..TokenServiceConfig::default()
    }));

    let verification_service = Arc::new(VerificationService::new(
        users.clone(),
        Arc::new(otp.clone()),
        VerificationServiceConfig::default(),
    ));
    let account_service = Arc::new(AccountService::new(
        users.clone(),
        verification_service,
        Arc::new(SmsNotifierAdapter::new(Box::new(sms.clone()))),
        token_service.clone(),
        AccountServiceConfig::default().with_bcrypt_cost(4),
    ));

    TestContext {
        state: web::Data::new(AppState::new(account_service, token_service.clone())),
        users,
        otp,
        sms,
        token_service,
    }
}

pub fn registration(email: &str) -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": email,
        "password": "correct horse battery",
        "country_code": "1",
        "phone_number": "4155552671"
    })
}
