//! Password policy and hashing commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pooplet_auth::{PasswordHasher, PasswordValidator};
use pooplet_core::error::AppError;

/// Arguments for password commands
#[derive(Debug, Args)]
pub struct PasswordArgs {
    /// Password subcommand
    #[command(subcommand)]
    pub command: PasswordCommand,
}

/// Password subcommands
#[derive(Debug, Subcommand)]
pub enum PasswordCommand {
    /// Check a password against the policy
    Check {
        /// Password (will prompt if not provided)
        password: Option<String>,
    },
    /// Hash a password for seeding a user record
    Hash {
        /// Password (will prompt if not provided)
        password: Option<String>,
    },
    /// Verify a password against a stored hash
    Verify {
        /// Stored Argon2 hash
        #[arg(long)]
        hash: String,
        /// Password (will prompt if not provided)
        password: Option<String>,
    },
}

/// Policy verdict plus an advisory strength estimate.
#[derive(Debug, Serialize, Tabled)]
struct PasswordReport {
    #[tabled(rename = "Policy")]
    policy: String,
    /// zxcvbn score 0-4. Informational only.
    #[tabled(rename = "Strength (0-4)")]
    strength: u8,
    #[tabled(rename = "Guesses (log10)")]
    guesses_log10: String,
}

fn report(password: &str) -> (PasswordReport, Result<(), AppError>) {
    let verdict = PasswordValidator::new().validate(password);
    // zxcvbn refuses blank input; treat it as the weakest score.
    let (strength, guesses_log10) = match zxcvbn::zxcvbn(password, &[]) {
        Ok(entropy) => (entropy.score(), format!("{:.1}", entropy.guesses_log10())),
        Err(_) => (0, "-".to_string()),
    };

    let report = PasswordReport {
        policy: match &verdict {
            Ok(()) => "ok".to_string(),
            Err(e) => e.to_string(),
        },
        strength,
        guesses_log10,
    };
    (report, verdict.map_err(AppError::from))
}

/// Execute password commands
pub async fn execute(args: &PasswordArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        PasswordCommand::Check { password } => {
            let password = super::read_password(password.as_deref(), false)?;
            let (report, verdict) = report(&password);
            output::print_item(&report, format)?;
            verdict?;
        }
        PasswordCommand::Hash { password } => {
            let password = super::read_password(password.as_deref(), true)?;
            PasswordValidator::new().validate(&password)?;
            let hash = PasswordHasher::new().hash_password(&password)?;
            output::print_value(&hash);
        }
        PasswordCommand::Verify { hash, password } => {
            let password = super::read_password(password.as_deref(), false)?;
            if !PasswordHasher::new().verify_password(&password, hash) {
                return Err(AppError::authentication("Password does not match"));
            }
            output::print_success("Password matches");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_policy_failure() {
        let (report, verdict) = report("short");
        assert_eq!(report.policy, "password must be at least 10 characters long");
        assert!(verdict.is_err());
        assert!(report.strength <= 4);
    }

    #[test]
    fn test_report_blank_password() {
        let (report, verdict) = report("");
        assert_eq!(report.strength, 0);
        assert!(verdict.is_err());
    }

    #[test]
    fn test_report_policy_ok() {
        let (report, verdict) = report("Correct7HorseBattery");
        assert_eq!(report.policy, "ok");
        assert!(verdict.is_ok());
    }

    #[tokio::test]
    async fn test_verify_mismatch_is_error() {
        let hash = PasswordHasher::new().hash_password("Abc1234567").unwrap();
        let args = PasswordArgs {
            command: PasswordCommand::Verify {
                hash,
                password: Some("Abc1234568".to_string()),
            },
        };
        let err = execute(&args, OutputFormat::Json).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
