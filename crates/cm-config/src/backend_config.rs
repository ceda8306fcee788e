use crate::{ConfigError, ConfigErrorResult, DEFAULT_BASE_URL};

use serde::Deserialize;

// Request timeout constraints
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Endpoints and API keys for the managed backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL shared by the auth API and the data API
    pub base_url: String,
    /// Publishable API key; safe to embed in clients
    pub publishable_key: String,
    /// Secret API key; enables the elevated write channel when present
    pub secret_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            publishable_key: String::new(),
            secret_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::backend(format!(
                "backend.base_url must start with http:// or https://, got {}",
                self.base_url
            )));
        }

        if self.publishable_key.is_empty() {
            return Err(ConfigError::backend(
                "backend.publishable_key is required (set CM_BACKEND_PUBLISHABLE_KEY or config.toml)",
            ));
        }

        if let Some(key) = &self.secret_key
            && key.is_empty()
        {
            return Err(ConfigError::backend(
                "backend.secret_key must not be empty when set",
            ));
        }

        if self.request_timeout_secs < MIN_REQUEST_TIMEOUT_SECS
            || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS
        {
            return Err(ConfigError::backend(format!(
                "backend.request_timeout_secs must be {}-{}, got {}",
                MIN_REQUEST_TIMEOUT_SECS, MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        Ok(())
    }

    /// Whether the elevated write channel is configured.
    pub fn has_elevated_channel(&self) -> bool {
        self.secret_key.is_some()
    }
}
