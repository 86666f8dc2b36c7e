//! Account service module
//!
//! Registration and the caller-level rules around phone verification:
//! duplicate emails, already-confirmed users, the welcome SMS and the
//! session token issued after confirmation.

mod config;
pub mod password;
mod service;
mod types;


pub use config::{AccountServiceConfig, SIGNUP_COMPLETE_MESSAGE};
pub use service::AccountService;
pub use types::{RegisterUser, RegistrationResult, VerifiedAccount};
