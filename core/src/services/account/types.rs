//! Inputs and results of account operations

use crate::domain::entities::user::User;

/// Registration input as submitted by the client
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub country_code: String,
    pub phone_number: String,
}

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    /// The stored user, with the provider handle assigned
    pub user: User,
}

/// Result of a successful phone confirmation
#[derive(Debug, Clone)]
pub struct VerifiedAccount {
    /// The confirmed user
    pub user: User,
    /// Signed session token for the user
    pub token: String,
    /// Whether the signup-complete SMS went out
    pub welcome_sms_sent: bool,
}
