//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! an optional TOML file overlaid with `POOPLET_`-prefixed environment
//! variables. Each sub-module represents a logical configuration section.

pub mod auth;
pub mod bootstrap;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::bootstrap::BootstrapConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Every section has defaults, so an empty source yields a loadable
/// configuration (which then fails the signing-secret gate).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Initial administrator settings.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables use the `POOPLET_`
    /// prefix and `__` as the section separator, e.g.
    /// `POOPLET_AUTH__JWT_SECRET`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("POOPLET")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::config::auth::DEFAULT_JWT_SECRET;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.auth.jwt_secret, DEFAULT_JWT_SECRET);
        assert_eq!(config.auth.token_ttl_hours, 168);
        assert!(config.auth.registration_enabled);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.bootstrap.initial_admin_name, "Administrator");
        assert!(config.bootstrap.credentials().is_none());
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[auth]
jwt_secret = "a-much-longer-production-secret"
token_ttl_hours = 2
registration_enabled = false

[bootstrap]
initial_admin_email = "root@example.com"
initial_admin_password = "Abc1234567"

[logging]
format = "json"
"#
        )
        .unwrap();

        let config = AppConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.auth.jwt_secret, "a-much-longer-production-secret");
        assert_eq!(config.auth.token_ttl().unwrap(), chrono::Duration::hours(2));
        assert!(!config.auth.registration_enabled);
        assert!(!config.auth.uses_default_secret());
        assert_eq!(
            config.bootstrap.credentials(),
            Some(("root@example.com", "Abc1234567"))
        );
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }
}
