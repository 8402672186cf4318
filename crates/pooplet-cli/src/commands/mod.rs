//! CLI command definitions and dispatch.

pub mod config;
pub mod password;
pub mod token;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use pooplet_core::config::AppConfig;
use pooplet_core::error::AppError;

/// Pooplet authentication operator tools
#[derive(Debug, Parser)]
#[command(name = "pooplet", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Configuration and signing-secret checks
    Config(config::ConfigArgs),
    /// Password policy and hashing tools
    Password(password::PasswordArgs),
    /// Session token tools
    Token(token::TokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Config(args) => config::execute(args, config, self.format).await,
            Commands::Password(args) => password::execute(args, self.format).await,
            Commands::Token(args) => token::execute(args, config, self.format).await,
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: read a password from the argument or prompt for it
pub fn read_password(given: Option<&str>, confirm: bool) -> Result<String, AppError> {
    if let Some(p) = given {
        return Ok(p.to_string());
    }

    let prompt = dialoguer::Password::new().with_prompt("Password");
    let prompt = if confirm {
        prompt.with_confirmation("Confirm password", "Passwords do not match")
    } else {
        prompt
    };

    prompt
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
