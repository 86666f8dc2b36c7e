//! Business services containing domain logic and use cases.

pub mod account;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, RegisterUser, RegistrationResult, VerifiedAccount};
pub use token::{TokenService, TokenServiceConfig};
pub use verification::{
    OtpProviderTrait, SendCodeResult, SmsNotifierTrait, VerificationService,
    VerificationServiceConfig, VerifyCodeResult,
};
