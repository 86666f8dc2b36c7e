//! Main verification service implementation

use av_shared::phone::mask_phone_number;
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::errors::{DomainResult, VerificationError};
use crate::repositories::UserRepository;

use super::config::VerificationServiceConfig;
use super::traits::OtpProviderTrait;
use super::types::{SendCodeResult, VerifyCodeResult};

/// Verification service driving a user through phone confirmation
///
/// Users move through `Registered -> ConfirmationRequested -> Confirmed`. The
/// provider handle is assigned and persisted the first time a code is requested;
/// the confirmed flag is set and persisted when the provider accepts a code.
pub struct VerificationService<U: UserRepository, P: OtpProviderTrait> {
    /// User store
    user_repository: Arc<U>,
    /// One-time password provider
    otp_provider: Arc<P>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<U: UserRepository, P: OtpProviderTrait> VerificationService<U, P> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Store the workflow reads and writes users through
    /// * `otp_provider` - Provider client, created once per process
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        otp_provider: Arc<P>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            otp_provider,
            config,
        }
    }

    /// Ask the provider to text a confirmation code to the user
    ///
    /// This method:
    /// 1. Rejects a missing user
    /// 2. Registers the user with the provider if no handle is stored, and persists the handle
    /// 3. Requests a code for the handle
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - `sent` is `false` when the provider ignored the request
    /// * `Err(DomainError)` - `UserNotFound`, `ProviderTransport`, or a storage error
    pub async fn request_confirmation_code(
        &self,
        user: Option<User>,
    ) -> DomainResult<SendCodeResult> {
        let mut user = user.ok_or(VerificationError::UserNotFound)?;
        let mut provider_registered = false;

        let provider_user_id = match user.provider_user_id.clone() {
            Some(id) => id,
            None => {
                let id = self
                    .otp_provider
                    .register_user(&user.email, &user.phone_number, &user.country_code)
                    .await
                    .map_err(|e| Self::transport_error("register_user", &user, e))?;

                user.assign_provider_user_id(id.clone());
                user = self.user_repository.update(user).await?;
                provider_registered = true;

                tracing::info!(
                    user_id = %user.id,
                    phone = %mask_phone_number(&user.full_phone_number()),
                    event = "otp_user_registered",
                    "Registered user with verification provider"
                );
                id
            }
        };

        let sent = self
            .otp_provider
            .request_code(&provider_user_id)
            .await
            .map_err(|e| Self::transport_error("request_code", &user, e))?;

        if sent {
            tracing::info!(
                user_id = %user.id,
                phone = %mask_phone_number(&user.full_phone_number()),
                event = "otp_requested",
                "Verification code requested"
            );
        } else {
            tracing::warn!(
                user_id = %user.id,
                event = "otp_request_ignored",
                "Verification provider ignored code request"
            );
        }

        Ok(SendCodeResult {
            user,
            sent,
            provider_registered,
        })
    }

    /// Check a submitted code and confirm the user's phone number on success
    ///
    /// A wrong code is not an error: it yields `VerifyCodeResult::Rejected` and
    /// leaves the user untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyCodeResult::Approved)` - Confirmed flag set and persisted
    /// * `Ok(VerifyCodeResult::Rejected)` - Code refused or malformed
    /// * `Err(DomainError)` - `UserNotFound`, `CodeNotSent` when no handle exists,
    ///   `ProviderTransport`, or a storage error
    pub async fn confirm_phone_number(
        &self,
        user: Option<User>,
        code: &str,
    ) -> DomainResult<VerifyCodeResult> {
        let mut user = user.ok_or(VerificationError::UserNotFound)?;

        let provider_user_id = match user.provider_user_id.clone() {
            Some(id) => id,
            None => {
                tracing::warn!(
                    user_id = %user.id,
                    event = "otp_verify_without_handle",
                    "Code submitted before any code was requested"
                );
                return Err(VerificationError::CodeNotSent.into());
            }
        };

        let code = code.trim();
        if !self.config.is_well_formed_code(code) {
            tracing::info!(
                user_id = %user.id,
                event = "otp_rejected_malformed",
                "Malformed verification code rejected"
            );
            return Ok(VerifyCodeResult::Rejected);
        }

        let ok = self
            .otp_provider
            .verify_code(&provider_user_id, code)
            .await
            .map_err(|e| Self::transport_error("verify_code", &user, e))?;

        if !ok {
            tracing::info!(
                user_id = %user.id,
                event = "otp_rejected",
                "Verification code rejected by provider"
            );
            return Ok(VerifyCodeResult::Rejected);
        }

        user.confirm_phone_number();
        let user = self.user_repository.update(user).await?;

        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone_number(&user.full_phone_number()),
            event = "phone_confirmed",
            "Phone number confirmed"
        );

        Ok(VerifyCodeResult::Approved)
    }

    /// Look up a user by email and request a confirmation code
    pub async fn request_confirmation_code_by_email(
        &self,
        email: &str,
    ) -> DomainResult<SendCodeResult> {
        let user = self.user_repository.find_by_email(email).await?;
        self.request_confirmation_code(user).await
    }

    /// Look up a user by email and check a submitted code
    pub async fn confirm_phone_number_by_email(
        &self,
        email: &str,
        code: &str,
    ) -> DomainResult<VerifyCodeResult> {
        let user = self.user_repository.find_by_email(email).await?;
        self.confirm_phone_number(user, code).await
    }

    fn transport_error(operation: &str, user: &User, error: String) -> VerificationError {
        tracing::error!(
            user_id = %user.id,
            operation = operation,
            error = %error,
            event = "otp_provider_error",
            "Verification provider call failed"
        );
        VerificationError::ProviderTransport { message: error }
    }
}
