//! Types for verification service results

use crate::domain::entities::user::User;

/// Result of requesting a confirmation code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The user as persisted after the request (handle assigned)
    pub user: User,
    /// Whether the provider accepted the request and sent a code
    pub sent: bool,
    /// Whether this call registered the user with the provider
    pub provider_registered: bool,
}

/// Outcome of checking a submitted code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyCodeResult {
    /// Code accepted; the phone number is now confirmed
    Approved,
    /// Wrong, expired or malformed code; nothing changed
    Rejected,
}

impl VerifyCodeResult {
    pub fn is_approved(&self) -> bool {
        matches!(self, VerifyCodeResult::Approved)
    }
}
