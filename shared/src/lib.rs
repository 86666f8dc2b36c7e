//! Shared utilities and common types for the account verification server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - API response structures
//! - Utility functions (phone formatting, input validation)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    ServerConfig,
};
pub use types::{ApiResponse, ErrorResponse, HealthResponse};
pub use utils::{phone, validation};
