//! # Account Verification Core
//!
//! Core business logic and domain layer for the account verification backend.
//! This crate contains the user entity, the phone verification workflow, the
//! account policy built on top of it, repository interfaces and error types.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
