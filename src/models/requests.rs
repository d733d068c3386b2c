//! Request DTOs for the proxy API
//!
//! Defines the structure of incoming request parameters.

use serde::Deserialize;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Path parameters for the lookup operation (GET /GET/:key)
#[derive(Debug, Clone, Deserialize)]
pub struct KeyPath {
    /// The key to look up
    pub key: String,
}

impl KeyPath {
    /// Validates the key
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}
