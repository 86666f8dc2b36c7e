//! Main account service implementation

use av_shared::phone::{
    is_valid_country_code, is_valid_national_number, mask_phone_number, normalize_country_code,
};
use av_shared::validation::validators::{is_valid_email, length_between, not_empty};
use av_shared::validation::ValidationErrors;
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, DomainResult, ValidationError, VerificationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;
use crate::services::verification::{
    OtpProviderTrait, SmsNotifierTrait, VerificationService, VerifyCodeResult,
};

use super::config::AccountServiceConfig;
use super::password::hash_password;
use super::types::{RegisterUser, RegistrationResult, VerifiedAccount};

/// Account service for registration and code handling on behalf of a client
pub struct AccountService<U: UserRepository, P: OtpProviderTrait, N: SmsNotifierTrait> {
    user_repository: Arc<U>,
    verification_service: Arc<VerificationService<U, P>>,
    sms_notifier: Arc<N>,
    token_service: Arc<TokenService>,
    config: AccountServiceConfig,
}

impl<U, P, N> AccountService<U, P, N>
where
    U: UserRepository,
    P: OtpProviderTrait,
    N: SmsNotifierTrait,
{
    /// Create a new account service
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<U, P>>,
        sms_notifier: Arc<N>,
        token_service: Arc<TokenService>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            sms_notifier,
            token_service,
            config,
        }
    }

    /// Register a new user and text them a confirmation code
    ///
    /// This method:
    /// 1. Validates the submitted fields
    /// 2. Rejects an email that is already registered
    /// 3. Stores the user with a bcrypt password hash
    /// 4. Requests a confirmation code through the verification workflow
    ///
    /// If the provider declines to send, the user stays registered and
    /// `CodeNotSent` is returned so the client can offer a resend.
    pub async fn register(&self, input: RegisterUser) -> DomainResult<RegistrationResult> {
        self.validate_registration(&input)?;

        if self.user_repository.exists_by_email(&input.email).await? {
            tracing::info!(event = "registration_duplicate_email", "Email already registered");
            return Err(VerificationError::EmailAlreadyInUse.into());
        }

        let password_hash = hash_password(&input.password, self.config.bcrypt_cost).await?;
        let phone_number: String = input
            .phone_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let user = User::new(
            input.name.trim().to_string(),
            input.email.trim().to_string(),
            password_hash,
            phone_number,
            normalize_country_code(&input.country_code),
        );
        let user = self.user_repository.create(user).await?;

        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone_number(&user.full_phone_number()),
            event = "user_registered",
            "User registered"
        );

        let result = self
            .verification_service
            .request_confirmation_code(Some(user))
            .await?;

        if !result.sent {
            return Err(VerificationError::CodeNotSent.into());
        }

        Ok(RegistrationResult { user: result.user })
    }

    /// Send a fresh confirmation code to an unconfirmed user
    pub async fn resend_code(&self, email: &str) -> DomainResult<User> {
        let user = self.find_unconfirmed(email).await?;

        let result = self
            .verification_service
            .request_confirmation_code(Some(user))
            .await?;

        if !result.sent {
            return Err(VerificationError::CodeNotSent.into());
        }

        Ok(result.user)
    }

    /// Check a submitted code, then welcome the user and issue a session token
    ///
    /// A wrong code surfaces as `VerificationFailed`. A failed welcome SMS is
    /// logged and reported in the result; the confirmation stands.
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<VerifiedAccount> {
        let user = self.find_unconfirmed(email).await?;
        let user_id = user.id;

        match self
            .verification_service
            .confirm_phone_number(Some(user), code)
            .await?
        {
            VerifyCodeResult::Approved => {}
            VerifyCodeResult::Rejected => {
                return Err(VerificationError::VerificationFailed.into());
            }
        }

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(VerificationError::UserNotFound)?;

        let welcome_sms_sent = match self
            .sms_notifier
            .send_sms(&user.full_phone_number(), &self.config.welcome_message)
            .await
        {
            Ok(message_id) => {
                tracing::info!(
                    user_id = %user.id,
                    message_id = %message_id,
                    event = "welcome_sms_sent",
                    "Signup complete message sent"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user.id,
                    error = %e,
                    event = "welcome_sms_failed",
                    "Failed to send signup complete message"
                );
                false
            }
        };

        let token = self.token_service.issue(&user)?;

        Ok(VerifiedAccount {
            user,
            token,
            welcome_sms_sent,
        })
    }

    /// Current record for an email, for prefilling the verify and resend screens
    pub async fn verification_status(&self, email: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| VerificationError::UserNotFound.into())
    }

    async fn find_unconfirmed(&self, email: &str) -> DomainResult<User> {
        let user = self.verification_status(email).await?;
        if user.phone_number_confirmed {
            return Err(VerificationError::AlreadyConfirmed.into());
        }
        Ok(user)
    }

    fn validate_registration(&self, input: &RegisterUser) -> DomainResult<()> {
        let mut errors = ValidationErrors::new();

        if !not_empty(&input.name) || !length_between(input.name.trim(), 1, 100) {
            errors.add_error("name", "Name is required", "required");
        }
        if !is_valid_email(input.email.trim()) {
            errors.add_error("email", "Email address is invalid", "invalid_email");
        }
        if !length_between(&input.password, self.config.min_password_length, 128) {
            errors.add_error(
                "password",
                format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
                "length",
            );
        }
        if !is_valid_country_code(&input.country_code) {
            errors.add_error("country_code", "Country code is invalid", "invalid_format");
        }
        if !is_valid_national_number(&input.phone_number) {
            errors.add_error("phone_number", "Phone number is invalid", "invalid_format");
        }

        errors.into_result().map_err(|errors| {
            DomainError::ValidationErr(ValidationError::InvalidInput {
                message: errors.to_string(),
                fields: errors.to_field_errors(),
            })
        })
    }
}
