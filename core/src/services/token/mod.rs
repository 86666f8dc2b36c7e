//! Token service module for JWT session tokens
//!
//! A session token is issued once a phone number is confirmed and is
//! required by the authenticated routes.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
