//! Type definitions shared by the API layer
//!
//! - `response` - API response wrappers, error bodies and health checks

pub mod response;

pub use response::{ApiResponse, ErrorResponse, HealthResponse};
