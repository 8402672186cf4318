//! Configuration and signing-secret CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pooplet_auth::SecretGuard;
use pooplet_core::config::AppConfig;
use pooplet_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Check that the signing secret is usable (exits non-zero if not)
    Check,
    /// Show the effective configuration with secrets redacted
    Show,
    /// Print a new random signing secret
    GenerateSecret {
        /// Number of random bytes before encoding
        #[arg(short, long, default_value_t = 48)]
        bytes: usize,
    },
}

/// Effective configuration, safe to print.
#[derive(Debug, Serialize, Tabled)]
struct ConfigSummary {
    #[tabled(rename = "JWT secret")]
    jwt_secret: String,
    #[tabled(rename = "Token TTL (h)")]
    token_ttl_hours: u64,
    #[tabled(rename = "Registration")]
    registration_enabled: bool,
    #[tabled(rename = "Log level")]
    log_level: String,
    #[tabled(rename = "Log format")]
    log_format: String,
    #[tabled(rename = "Initial admin")]
    initial_admin: String,
}

impl ConfigSummary {
    fn from_config(config: &AppConfig) -> Self {
        let secret_status = match SecretGuard::validate(&config.auth.jwt_secret) {
            Ok(()) => "valid".to_string(),
            Err(e) => e.to_string(),
        };
        let initial_admin = match config.bootstrap.credentials() {
            Some((email, _)) => format!("{email} ({})", config.bootstrap.initial_admin_name),
            None => "-".to_string(),
        };

        Self {
            jwt_secret: format!(
                "<redacted, {} bytes> {secret_status}",
                config.auth.jwt_secret.len()
            ),
            token_ttl_hours: config.auth.token_ttl_hours,
            registration_enabled: config.auth.registration_enabled,
            log_level: config.logging.level.clone(),
            log_format: config.logging.format.clone(),
            initial_admin,
        }
    }
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Check => {
            if let Err(e) = SecretGuard::validate(&config.auth.jwt_secret) {
                tracing::error!(error = %e, "Startup check failed: JWT secret is invalid");
                output::print_error(&format!("{e}"));
                output::print_error(
                    "Set POOPLET_AUTH__JWT_SECRET (try `pooplet config generate-secret`)",
                );
                return Err(AppError::from(e));
            }
            if let Err(e) = config.auth.token_ttl() {
                tracing::error!(
                    error = %e.message,
                    "Startup check failed: token TTL is out of range"
                );
                output::print_error(&e.message);
                return Err(e);
            }
            output::print_success("JWT secret and token TTL are valid; tokens can be issued");
        }
        ConfigCommand::Show => {
            if config.auth.uses_default_secret() {
                output::print_warning("The JWT secret is still the shipped default");
            }
            output::print_item(&ConfigSummary::from_config(config), format)?;
        }
        ConfigCommand::GenerateSecret { bytes } => {
            output::print_value(&SecretGuard::generate(*bytes));
        }
    }

    Ok(())
}
