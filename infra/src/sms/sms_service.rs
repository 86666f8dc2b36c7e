//! SMS Service Interface
//!
//! Defines the trait for SMS providers and the adapter that exposes any of
//! them to the verification workflow as an `SmsNotifierTrait`.

use async_trait::async_trait;
use av_core::services::verification::SmsNotifierTrait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio SMS API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (E.164 format)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}

/// Adapter that implements the core `SmsNotifierTrait` for any SMS provider
pub struct SmsNotifierAdapter {
    inner: Box<dyn SmsService>,
}

impl SmsNotifierAdapter {
    /// Wrap an SMS provider
    pub fn new(inner: Box<dyn SmsService>) -> Self {
        Self { inner }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsNotifierTrait for SmsNotifierAdapter {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, String> {
        self.inner
            .send_sms(to, body)
            .await
            .map_err(|e| e.to_string())
    }
}
