//! User entity representing a registered account and its phone verification state.

use av_shared::utils::phone::format_e164;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a user stands in the phone verification flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationState {
    /// Registered locally, not yet known to the verification provider
    Registered,
    /// Provider handle assigned, waiting for the user to enter a code
    ConfirmationRequested,
    /// Phone number confirmed
    Confirmed,
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, unique across the store
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// National phone number digits
    pub phone_number: String,

    /// Country calling code without the leading `+` (e.g. "1", "61")
    pub country_code: String,

    /// Whether the phone number has been confirmed with a code
    pub phone_number_confirmed: bool,

    /// Opaque handle issued by the verification provider
    pub provider_user_id: Option<String>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, unconfirmed user
    pub fn new(
        name: String,
        email: String,
        password_hash: String,
        phone_number: String,
        country_code: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            phone_number,
            country_code,
            phone_number_confirmed: false,
            provider_user_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Phone number in `+{country_code}{phone_number}` form
    pub fn full_phone_number(&self) -> String {
        format_e164(&self.country_code, &self.phone_number)
    }

    /// Stores the handle issued by the verification provider
    pub fn assign_provider_user_id(&mut self, provider_user_id: impl Into<String>) {
        self.provider_user_id = Some(provider_user_id.into());
        self.updated_at = Utc::now();
    }

    /// Marks the phone number as confirmed. There is no way back.
    pub fn confirm_phone_number(&mut self) {
        if !self.phone_number_confirmed {
            self.phone_number_confirmed = true;
            self.updated_at = Utc::now();
        }
    }

    pub fn has_provider_user_id(&self) -> bool {
        self.provider_user_id.is_some()
    }

    pub fn verification_state(&self) -> VerificationState {
        if self.phone_number_confirmed {
            VerificationState::Confirmed
        } else if self.has_provider_user_id() {
            VerificationState::ConfirmationRequested
        } else {
            VerificationState::Registered
        }
    }
}
