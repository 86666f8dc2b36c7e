//! Mock OTP Provider Implementation
//!
//! A development stand-in for the verification provider. Codes are generated
//! locally and written to the log instead of being texted.

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use av_core::services::verification::OtpProviderTrait;

/// Length of generated codes
pub const MOCK_CODE_LENGTH: usize = 6;

/// Mock OTP provider for development and testing
#[derive(Clone, Default)]
pub struct MockOtpProvider {
    /// Counter used to issue provider handles
    next_id: Arc<AtomicU64>,
    /// Outstanding code per handle
    codes: Arc<RwLock<HashMap<String, String>>>,
    /// Whether to simulate an unreachable provider
    simulate_failure: bool,
}

impl MockOtpProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider whose every call fails at the transport level
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// The outstanding code for a handle, if any
    pub async fn code_for(&self, provider_user_id: &str) -> Option<String> {
        self.codes.read().await.get(provider_user_id).cloned()
    }

    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        (0..MOCK_CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    fn check_available(&self) -> Result<(), String> {
        if self.simulate_failure {
            warn!(provider = "mock", "Mock OTP provider simulating failure");
            return Err("Simulated OTP provider failure".to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl OtpProviderTrait for MockOtpProvider {
    async fn register_user(
        &self,
        _email: &str,
        _phone_number: &str,
        _country_code: &str,
    ) -> Result<String, String> {
        self.check_available()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("mock-{}", id))
    }

    async fn request_code(&self, provider_user_id: &str) -> Result<bool, String> {
        self.check_available()?;
        let code = Self::generate_code();

        info!(
            target: "otp_provider",
            provider = "mock",
            provider_user_id = %provider_user_id,
            code = %code,
            "Verification code issued (mock)"
        );

        self.codes
            .write()
            .await
            .insert(provider_user_id.to_string(), code);
        Ok(true)
    }

    async fn verify_code(&self, provider_user_id: &str, code: &str) -> Result<bool, String> {
        self.check_available()?;
        let mut codes = self.codes.write().await;

        let matches = codes
            .get(provider_user_id)
            .map(|expected| constant_time_eq(expected.as_bytes(), code.as_bytes()))
            .unwrap_or(false);

        if matches {
            codes.remove(provider_user_id);
        }
        Ok(matches)
    }
}
