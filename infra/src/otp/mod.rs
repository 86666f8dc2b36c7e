//! OTP Provider Module
//!
//! One-time password providers used for phone verification. The provider owns
//! code generation, delivery and expiry; this service only stores the handle
//! it issues per user.

pub mod authy;
pub mod mock_otp;

pub use authy::AuthyOtpProvider;
pub use mock_otp::MockOtpProvider;

use av_core::services::verification::OtpProviderTrait;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an OTP provider based on configuration
///
/// An explicitly requested Authy client that cannot be built is an error, as
/// is an unknown provider name. Only `mock` yields the in-process provider.
pub fn create_otp_provider(
    config: &crate::config::OtpConfig,
) -> Result<Box<dyn OtpProviderTrait>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => {
            tracing::warn!("Using mock OTP provider; codes are written to the log");
            Ok(Box::new(MockOtpProvider::new()))
        }
        "authy" => {
            let provider = AuthyOtpProvider::new(config)?;
            tracing::info!(api_url = %config.api_url, "Using Authy OTP provider");
            Ok(Box::new(provider))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown OTP provider '{}'",
            other
        ))),
    }
}
