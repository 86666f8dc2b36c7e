//! Outbound SMS for the messages this service sends itself (the
//! signup-complete text). Verification codes are texted by the OTP provider.

pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use mock_sms::MockSmsService;
pub use sms_service::{SmsNotifierAdapter, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

/// Pick the SMS provider named in `config.provider`
///
/// Unknown providers and incomplete Twilio credentials fall back to the mock.
pub fn create_sms_service(config: &crate::config::SmsConfig) -> Box<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Box::new(MockSmsService::new()),
        #[cfg(feature = "twilio-sms")]
        "twilio" => match TwilioConfig::from_sms_config(config) {
            Ok(twilio_config) => Box::new(TwilioSmsService::new(twilio_config)),
            Err(e) => {
                tracing::error!(error = %e, "Twilio is not configured, using mock SMS service");
                Box::new(MockSmsService::new())
            }
        },
        other => {
            tracing::warn!(provider = %other, "Unknown SMS provider, using mock SMS service");
            Box::new(MockSmsService::new())
        }
    }
}
