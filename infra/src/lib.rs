//! # Infrastructure Layer
//!
//! Concrete implementations of the seams defined in `av_core`:
//!
//! - **Database**: MySQL user store using SQLx
//! - **OTP**: Authy-style one-time password provider client and a development provider
//! - **SMS**: Twilio notifier and a development notifier
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `twilio-sms`: Enable Twilio SMS service (default)

// Re-export core types for convenience
pub use av_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// OTP provider module - phone verification providers
pub mod otp;

/// SMS service module - External SMS providers
pub mod sms;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration for the external providers
    //!
    //! Provider credentials keep the variable names the service has always
    //! used: `AUTHY_KEY`, `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_NUMBER`.

    use serde::{Deserialize, Serialize};

    pub use av_shared::config::DatabaseConfig;

    /// Default base URL of the Authy API
    pub const DEFAULT_AUTHY_API_URL: &str = "https://api.authy.com";

    /// Infrastructure configuration settings
    #[derive(Debug, Clone, Serialize, Deserialize, Default)]
    pub struct InfrastructureConfig {
        /// Database configuration
        pub database: DatabaseConfig,
        /// OTP provider configuration
        pub otp: OtpConfig,
        /// SMS service configuration
        pub sms: SmsConfig,
    }

    impl InfrastructureConfig {
        /// Load every section from the environment
        pub fn from_env() -> Self {
            Self {
                database: DatabaseConfig::from_env(),
                otp: OtpConfig::from_env(),
                sms: SmsConfig::from_env(),
            }
        }
    }

    /// OTP provider configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct OtpConfig {
        /// OTP provider ("authy", "mock")
        pub provider: String,
        /// Provider API key
        pub api_key: String,
        /// Provider base URL
        pub api_url: String,
        /// Timeout for provider requests in seconds
        pub request_timeout_secs: u64,
    }

    impl Default for OtpConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                api_key: String::new(),
                api_url: DEFAULT_AUTHY_API_URL.to_string(),
                request_timeout_secs: 10,
            }
        }
    }

    impl OtpConfig {
        /// Create from environment variables
        ///
        /// Without `OTP_PROVIDER`, a present `AUTHY_KEY` selects the Authy client.
        pub fn from_env() -> Self {
            let defaults = Self::default();
            let api_key = std::env::var("AUTHY_KEY").unwrap_or_default();
            let provider = std::env::var("OTP_PROVIDER").unwrap_or_else(|_| {
                if api_key.is_empty() {
                    defaults.provider.clone()
                } else {
                    "authy".to_string()
                }
            });

            Self {
                provider,
                api_key,
                api_url: std::env::var("AUTHY_API_URL").unwrap_or(defaults.api_url),
                request_timeout_secs: std::env::var("OTP_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.request_timeout_secs),
            }
        }
    }

    /// SMS service configuration
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct SmsConfig {
        /// SMS service provider ("twilio", "mock")
        pub provider: String,
        /// API credentials
        pub api_key: String,
        /// API secret/token
        pub api_secret: String,
        /// From phone number
        pub from_number: String,
    }

    impl Default for SmsConfig {
        fn default() -> Self {
            Self {
                provider: "mock".to_string(),
                api_key: String::new(),
                api_secret: String::new(),
                from_number: "+15005550006".to_string(),
            }
        }
    }

    impl SmsConfig {
        /// Create from environment variables
        ///
        /// Without `SMS_PROVIDER`, a present `TWILIO_ACCOUNT_SID` selects Twilio.
        pub fn from_env() -> Self {
            let defaults = Self::default();
            let api_key = std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default();
            let provider = std::env::var("SMS_PROVIDER").unwrap_or_else(|_| {
                if api_key.is_empty() {
                    defaults.provider.clone()
                } else {
                    "twilio".to_string()
                }
            });

            Self {
                provider,
                api_key,
                api_secret: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default(),
                from_number: std::env::var("TWILIO_NUMBER").unwrap_or(defaults.from_number),
            }
        }
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// OTP provider error
    #[error("OTP provider error: {0}")]
    Otp(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Database(e) => DomainError::Database {
                message: e.to_string(),
            },
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
