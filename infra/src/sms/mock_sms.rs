//! Development notifier: messages are logged and kept in memory instead of sent.

use async_trait::async_trait;
use av_shared::phone::{is_valid_international_phone, mask_phone_number};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use super::sms_service::SmsService;
use crate::InfrastructureError;

/// In-memory SMS service. Clones share the outbox.
#[derive(Clone, Default)]
pub struct MockSmsService {
    /// Recipient and body of every delivered message
    outbox: Arc<Mutex<Vec<(String, String)>>>,
    simulate_failure: bool,
}

impl MockSmsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service whose every send fails, for exercising error paths
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Number of messages delivered so far
    pub fn get_message_count(&self) -> usize {
        self.sent_messages().len()
    }

    /// Messages delivered so far, as (recipient, body)
    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked = mask_phone_number(phone_number);

        if !is_valid_international_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked
            )));
        }

        if self.simulate_failure {
            warn!(phone = %masked, event = "sms_failed", "Mock SMS failure");
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        if let Ok(mut outbox) = self.outbox.lock() {
            outbox.push((phone_number.to_string(), message.to_string()));
        }

        info!(
            provider = "mock",
            phone = %masked,
            message_id = %message_id,
            body = %message,
            event = "sms_sent",
            "SMS delivered to mock outbox"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
