//! Account route handlers
//!
//! This module contains the registration and phone verification endpoints:
//! - Registration (stores the user and texts a code)
//! - Verification status, code entry and resend
//! - Signed-in user status

pub mod register;
pub mod resend;
pub mod status;
pub mod verify;

use std::sync::Arc;

use av_core::repositories::UserRepository;
use av_core::services::token::TokenService;
use av_core::services::verification::{OtpProviderTrait, SmsNotifierTrait};
use av_core::services::AccountService;

/// Application state that holds shared services
pub struct AppState<U, P, N>
where
    U: UserRepository,
    P: OtpProviderTrait,
    N: SmsNotifierTrait,
{
    pub account_service: Arc<AccountService<U, P, N>>,
    pub token_service: Arc<TokenService>,
}

impl<U, P, N> AppState<U, P, N>
where
    U: UserRepository,
    P: OtpProviderTrait,
    N: SmsNotifierTrait,
{
    pub fn new(
        account_service: Arc<AccountService<U, P, N>>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            account_service,
            token_service,
        }
    }
}
