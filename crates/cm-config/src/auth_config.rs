use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Password policy constraints
pub const MIN_MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_MIN_PASSWORD_LENGTH: usize = 128;
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Minimum bytes for an HS256 verification secret.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Local password policy, checked before any signup call
    pub min_password_length: usize,
    /// Project JWT secret. When set, session tokens are verified rather
    /// than merely decoded.
    pub jwt_secret: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            jwt_secret: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.min_password_length < MIN_MIN_PASSWORD_LENGTH
            || self.min_password_length > MAX_MIN_PASSWORD_LENGTH
        {
            return Err(ConfigError::auth(format!(
                "auth.min_password_length must be {}-{}, got {}",
                MIN_MIN_PASSWORD_LENGTH, MAX_MIN_PASSWORD_LENGTH, self.min_password_length
            )));
        }

        if let Some(secret) = &self.jwt_secret
            && secret.len() < MIN_JWT_SECRET_BYTES
        {
            return Err(ConfigError::auth(format!(
                "auth.jwt_secret must be at least {} bytes when set",
                MIN_JWT_SECRET_BYTES
            )));
        }

        Ok(())
    }
}
