//! Configuration for the verification service

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Shortest code that is forwarded to the provider
    pub min_code_length: usize,
    /// Longest code that is forwarded to the provider
    pub max_code_length: usize,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            min_code_length: 4,
            max_code_length: 10,
        }
    }
}

impl VerificationServiceConfig {
    /// Whether `code` has the shape of a one-time code (ASCII digits, length in range)
    pub fn is_well_formed_code(&self, code: &str) -> bool {
        (self.min_code_length..=self.max_code_length).contains(&code.len())
            && code.chars().all(|c| c.is_ascii_digit())
    }
}
