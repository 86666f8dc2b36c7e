use av_core::domain::entities::user::{User, VerificationState};
use av_core::services::RegisterUser;
use av_shared::phone::mask_phone_number;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Country calling code with or without '+' prefix
    /// Examples: "+1", "44"
    #[validate(length(min = 1, max = 5))]
    pub country_code: String,

    /// National number, digits with optional separators
    #[validate(length(min = 4, max = 20))]
    pub phone_number: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
            country_code: request.country_code,
            phone_number: request.phone_number,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(email)]
    pub email: String,

    /// Code received by SMS
    #[validate(length(min = 1, max = 16))]
    pub verification_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendRequest {
    #[validate(email)]
    pub email: String,
}

/// Public view of a user. The phone number is always masked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub phone_number_confirmed: bool,
    pub verification_state: VerificationState,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone_number: mask_phone_number(&user.full_phone_number()),
            phone_number_confirmed: user.phone_number_confirmed,
            verification_state: user.verification_state(),
        }
    }
}

/// Unauthenticated status view used to prefill the verify and resend forms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationStatusResponse {
    pub email: String,
    pub verification_state: VerificationState,
}

impl From<&User> for VerificationStatusResponse {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            verification_state: user.verification_state(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub welcome_sms_sent: bool,
}
