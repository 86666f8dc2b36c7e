//! Twilio notifier
//!
//! Numbers are checked and normalized to E.164 with `phonenumber` before the
//! request; transient failures are retried with a doubling delay.

use async_trait::async_trait;
use av_shared::phone::mask_phone_number;
use phonenumber::{Mode, PhoneNumber};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use crate::{config::SmsConfig, sms::sms_service::SmsService, InfrastructureError};

/// Longest body Twilio accepts
pub const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum attempts per message
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
}

impl TwilioConfig {
    /// Create configuration from the generic SMS settings
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        Self::build(
            config.api_key.clone(),
            config.api_secret.clone(),
            config.from_number.clone(),
        )
    }

    fn build(
        account_sid: String,
        auth_token: String,
        from_number: String,
    ) -> Result<Self, InfrastructureError> {
        if account_sid.is_empty() || auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio credentials are missing".to_string(),
            ));
        }
        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            max_retries: 3,
            retry_delay_ms: 1000,
        })
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(from = %mask_phone_number(&config.from_number), "Twilio SMS service ready");

        Self { client, config }
    }

    /// Validate and normalize phone number to E.164 format
    fn validate_phone_number(&self, phone: &str) -> Result<String, InfrastructureError> {
        if !phone.starts_with('+') {
            return Err(InfrastructureError::Sms(
                "Phone number must be in E.164 format (e.g., +14155552671)".to_string(),
            ));
        }

        match phone.parse::<PhoneNumber>() {
            Ok(parsed) => {
                let formatted = parsed.format().mode(Mode::E164).to_string();
                debug!("Validated phone number: {}", mask_phone_number(&formatted));
                Ok(formatted)
            }
            Err(e) => {
                error!("Invalid phone number format: {}", e);
                Err(InfrastructureError::Sms(format!(
                    "Invalid phone number format: {}",
                    e
                )))
            }
        }
    }

    /// Send one message, retrying transient failures with doubling delays
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked = mask_phone_number(to);
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let mut attempt = 1;

        loop {
            let outbound = OutboundMessage::new(&self.config.from_number, to, message);

            let error = match self.client.send_message(outbound).await {
                Ok(response) => {
                    info!(phone = %masked, sid = %response.sid, attempt, event = "sms_sent", "SMS sent via Twilio");
                    return Ok(response.sid);
                }
                Err(e) => e.to_string(),
            };

            error!(phone = %masked, attempt, error = %error, event = "sms_attempt_failed", "Twilio send failed");

            if !is_transient(&error) {
                return Err(InfrastructureError::Sms(format!("Twilio rejected the message: {}", error)));
            }
            if attempt >= self.config.max_retries {
                return Err(InfrastructureError::Sms(format!(
                    "Failed to send SMS after {} attempts: {}",
                    attempt, error
                )));
            }

            warn!(retry_in = ?delay, "Retrying Twilio send");
            tokio::time::sleep(delay).await;
            delay *= 2;
            attempt += 1;
        }
    }
}

/// Rate limiting, server errors and network failures are worth another attempt;
/// a 4xx other than 429 means the request itself is wrong.
fn is_transient(error: &str) -> bool {
    let lower = error.to_ascii_lowercase();
    if lower.contains("429")
        || lower.contains("rate limit")
        || lower.contains("too many requests")
    {
        return true;
    }
    !(lower.contains("400")
        || lower.contains("401")
        || lower.contains("403")
        || lower.contains("404")
        || lower.contains("invalid"))
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let normalized_phone = self.validate_phone_number(phone_number)?;

        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        self.send_with_retry(&normalized_phone, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
