//! Phone verification workflow
//!
//! This module coordinates a stored user record with an external one-time
//! password provider:
//! - Registering the user with the provider on first use
//! - Requesting an SMS code for the stored provider handle
//! - Checking a submitted code and marking the phone number confirmed

mod config;
mod service;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{OtpProviderTrait, SmsNotifierTrait};
pub use types::{SendCodeResult, VerifyCodeResult};
