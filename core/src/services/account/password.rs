//! bcrypt password hashing
//!
//! Hashing runs on the blocking pool so request workers are not stalled.

use crate::errors::{DomainError, DomainResult};

/// Hash a plaintext password
pub async fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password hashing task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
}

/// Check a plaintext password against a stored hash
#[cfg(test)]
pub(crate) async fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Password verification task failed: {}", e),
        })?
        .map_err(|e| DomainError::Internal {
            message: format!("Failed to verify password: {}", e),
        })
}
