//! Configuration for the account service

/// Text sent once a phone number is confirmed
pub const SIGNUP_COMPLETE_MESSAGE: &str =
    "Your account is now verified. Welcome aboard!";

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
    /// Body of the SMS sent after a successful confirmation
    pub welcome_message: String,
    /// Shortest accepted password
    pub min_password_length: usize,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            welcome_message: SIGNUP_COMPLETE_MESSAGE.to_string(),
            min_password_length: 8,
        }
    }
}

impl AccountServiceConfig {
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
