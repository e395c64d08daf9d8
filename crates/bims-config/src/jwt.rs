//! Bearer token signing configuration.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC signing secret (required, no default)
//! - `JWT_ACCESS_EXPIRY`: access token lifetime in seconds (default: 3600)
//! - `JWT_LEEWAY`: clock skew tolerated when checking `exp`, in seconds (default: 0)
//!
//! A missing or blank secret fails startup. Secrets shorter than
//! [`JwtConfig::MIN_SECRET_LEN`] bytes are rejected when `APP_ENV=production`
//! and only logged otherwise.

use std::fmt;

use crate::error::ConfigError;
use crate::server::AppEnv;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
    pub leeway_seconds: u64,
}

impl JwtConfig {
    pub const MIN_SECRET_LEN: usize = 32;
    pub const DEFAULT_ACCESS_EXPIRY: i64 = 3600;

    /// Builds a config around an explicit secret with default expiry and no leeway.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry: Self::DEFAULT_ACCESS_EXPIRY,
            leeway_seconds: 0,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(crate::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        if secret.len() < Self::MIN_SECRET_LEN {
            if AppEnv::from_lookup(&lookup).is_production() {
                return Err(ConfigError::invalid(
                    "JWT_SECRET",
                    format!("must be at least {} bytes", Self::MIN_SECRET_LEN),
                ));
            }
            tracing::warn!(
                length = secret.len(),
                minimum = Self::MIN_SECRET_LEN,
                "JWT_SECRET is shorter than recommended"
            );
        }

        let access_token_expiry = match lookup("JWT_ACCESS_EXPIRY") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| {
                    ConfigError::invalid("JWT_ACCESS_EXPIRY", "expected a positive integer")
                })?,
            None => Self::DEFAULT_ACCESS_EXPIRY,
        };

        let leeway_seconds = match lookup("JWT_LEEWAY") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid("JWT_LEEWAY", e.to_string()))?,
            None => 0,
        };

        Ok(Self {
            secret,
            access_token_expiry,
            leeway_seconds,
        })
    }
}

// Key material stays out of logs.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}
