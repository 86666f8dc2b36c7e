//! Traits for OTP provider and SMS notifier integration
//!
//! `Err(String)` is reserved for transport or service failures. A provider that
//! answers but declines (ignored request, wrong code) reports it through the
//! `Ok` value.

use async_trait::async_trait;

/// Trait for one-time password provider integration
#[async_trait]
pub trait OtpProviderTrait: Send + Sync {
    /// Register a user with the provider and return the provider's handle for them
    async fn register_user(
        &self,
        email: &str,
        phone_number: &str,
        country_code: &str,
    ) -> Result<String, String>;
    /// Ask the provider to text a fresh code; `false` means the request was ignored
    async fn request_code(&self, provider_user_id: &str) -> Result<bool, String>;
    /// Check a code; `false` means wrong or expired
    async fn verify_code(&self, provider_user_id: &str, code: &str) -> Result<bool, String>;
}

#[async_trait]
impl<T: OtpProviderTrait + ?Sized> OtpProviderTrait for Box<T> {
    async fn register_user(
        &self,
        email: &str,
        phone_number: &str,
        country_code: &str,
    ) -> Result<String, String> {
        (**self).register_user(email, phone_number, country_code).await
    }

    async fn request_code(&self, provider_user_id: &str) -> Result<bool, String> {
        (**self).request_code(provider_user_id).await
    }

    async fn verify_code(&self, provider_user_id: &str, code: &str) -> Result<bool, String> {
        (**self).verify_code(provider_user_id, code).await
    }
}

/// Trait for plain SMS delivery
#[async_trait]
pub trait SmsNotifierTrait: Send + Sync {
    /// Send a text message, returning the provider's message ID
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, String>;
}
