//! API process configuration
//!
//! Combines the shared application settings with the provider settings owned
//! by the infrastructure layer.

use av_core::services::{AccountServiceConfig, TokenServiceConfig, VerificationServiceConfig};
use av_infra::config::InfrastructureConfig;
use av_shared::config::AppConfig;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub app: AppConfig,
    pub infrastructure: InfrastructureConfig,
}

impl Config {
    /// Load every section from the environment
    pub fn from_env() -> Self {
        Self {
            app: AppConfig::from_env(),
            infrastructure: InfrastructureConfig::from_env(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app.is_production()
    }

    /// Whether a MySQL database is configured; otherwise the in-memory store is used
    pub fn uses_database(&self) -> bool {
        self.infrastructure.database.is_configured()
    }

    pub fn token_service_config(&self) -> TokenServiceConfig {
        TokenServiceConfig::from(&self.app.auth.jwt)
    }

    pub fn account_service_config(&self) -> AccountServiceConfig {
        AccountServiceConfig::default().with_bcrypt_cost(self.app.auth.bcrypt_cost)
    }

    pub fn verification_service_config(&self) -> VerificationServiceConfig {
        VerificationServiceConfig::default()
    }

    /// Refuse settings that are only safe in development
    ///
    /// The mock OTP provider writes every code to the log, so production must
    /// talk to Authy.
    pub fn check_production(&self) -> Result<(), String> {
        if !self.is_production() {
            return Ok(());
        }
        if self.app.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.infrastructure.otp.provider != "authy" {
            return Err(format!(
                "OTP_PROVIDER '{}' is not allowed in production, use authy",
                self.infrastructure.otp.provider
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_shared::config::Environment;

    #[test]
    fn test_default_config_uses_in_memory_store_and_mock_providers() {
        let config = Config::default();

        assert!(!config.uses_database());
        assert_eq!(config.infrastructure.otp.provider, "mock");
        assert_eq!(config.infrastructure.sms.provider, "mock");
        assert_eq!(config.account_service_config().bcrypt_cost, 12);
    }

    #[test]
    fn test_token_config_follows_jwt_settings() {
        let mut config = Config::default();
        config.app.auth.jwt.secret = "s3cret".to_string();
        config.app.auth.jwt.expiry_seconds = 600;

        let token_config = config.token_service_config();
        assert_eq!(token_config.jwt_secret, "s3cret");
        assert_eq!(token_config.expiry_seconds, 600);
    }

    #[test]
    fn test_development_allows_mock_provider_and_default_secret() {
        assert!(Config::default().check_production().is_ok());
    }

    #[test]
    fn test_production_rejects_mock_otp_provider() {
        let mut config = Config::default();
        config.app.environment = Environment::Production;
        config.app.auth.jwt.secret = "s3cret".to_string();

        let err = config.check_production().unwrap_err();
        assert!(err.contains("OTP_PROVIDER"));

        config.infrastructure.otp.provider = "authy".to_string();
        assert!(config.check_production().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let mut config = Config::default();
        config.app.environment = Environment::Production;
        config.infrastructure.otp.provider = "authy".to_string();

        let err = config.check_production().unwrap_err();
        assert!(err.contains("JWT_SECRET"));
    }
}
