//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The placeholder secret shipped in the default configuration.
///
/// Token issuance refuses to sign with this value.
pub const DEFAULT_JWT_SECRET: &str = "your-super-secret-key-change-in-production";

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token TTL in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Whether self-service registration is open at startup.
    #[serde(default = "default_true")]
    pub registration_enabled: bool,
}

impl AuthConfig {
    /// Returns the session token lifetime.
    ///
    /// Fails when `token_ttl_hours` does not fit a `chrono::Duration`.
    pub fn token_ttl(&self) -> Result<chrono::Duration, AppError> {
        i64::try_from(self.token_ttl_hours)
            .ok()
            .and_then(chrono::Duration::try_hours)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "auth.token_ttl_hours is out of range: {}",
                    self.token_ttl_hours
                ))
            })
    }

    /// Returns whether the configured secret is still the shipped placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl(),
            registration_enabled: true,
        }
    }
}

fn default_jwt_secret() -> String {
    DEFAULT_JWT_SECRET.to_string()
}

fn default_token_ttl() -> u64 {
    24 * 7
}

fn default_true() -> bool {
    true
}
