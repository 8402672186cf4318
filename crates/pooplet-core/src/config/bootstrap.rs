//! Initial administrator bootstrap configuration.

use serde::{Deserialize, Serialize};

/// Settings for creating the first administrator on an empty user directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Email of the initial admin. Bootstrap is skipped when unset.
    #[serde(default)]
    pub initial_admin_email: Option<String>,
    /// Plaintext password of the initial admin.
    #[serde(default)]
    pub initial_admin_password: Option<String>,
    /// Display name of the initial admin.
    #[serde(default = "default_admin_name")]
    pub initial_admin_name: String,
}

impl BootstrapConfig {
    /// Returns the `(email, password)` pair when both are configured and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (
            self.initial_admin_email.as_deref(),
            self.initial_admin_password.as_deref(),
        ) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
                Some((email, password))
            }
            _ => None,
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            initial_admin_email: None,
            initial_admin_password: None,
            initial_admin_name: default_admin_name(),
        }
    }
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}
