// API key loading
// Author: kelexine (https://github.com/kelexine)

use tracing::{debug, warn};
use zeroize::Zeroize;

/// Static Gemini API key, wiped from memory on drop.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Custom Debug impl that never logs the key
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKey").field(&"[REDACTED]").finish()
    }
}

/// Read the API key from the environment variable `var`.
///
/// A missing or blank variable is not fatal: the server still starts and
/// every analysis fails with an authentication error instead.
pub fn load_api_key(var: &str) -> Option<ApiKey> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => {
            debug!("Loaded API key from {}", var);
            Some(ApiKey::new(value.trim()))
        }
        _ => {
            warn!("{} is not set; analyses will fail until it is configured", var);
            None
        }
    }
}
