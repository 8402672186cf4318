//! Session token commands.

use chrono::{DateTime, Duration, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use pooplet_auth::{Claims, JwtDecoder, JwtEncoder, SecretStore};
use pooplet_core::config::AppConfig;
use pooplet_core::error::AppError;
use pooplet_entity::user::{User, UserRole};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a token signed with the configured secret
    Issue {
        /// Subject user ID
        #[arg(long)]
        user_id: String,
        /// Email claim
        #[arg(long)]
        email: String,
        /// Role claim (admin, user)
        #[arg(long, default_value = "user")]
        role: UserRole,
        /// Lifetime in hours (defaults to auth.token_ttl_hours)
        #[arg(long)]
        ttl_hours: Option<i64>,
    },
    /// Validate a token and show its claims
    Inspect {
        /// Encoded token
        token: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct IssuedRow {
    #[tabled(rename = "Token")]
    token: String,
    #[tabled(rename = "Expires at")]
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Tabled)]
struct ClaimsRow {
    #[tabled(rename = "User ID")]
    user_id: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Role")]
    role: UserRole,
    #[tabled(rename = "Issued at")]
    issued_at: DateTime<Utc>,
    #[tabled(rename = "Expires at")]
    expires_at: DateTime<Utc>,
    #[tabled(rename = "Remaining (s)")]
    remaining_seconds: u64,
}

impl From<Claims> for ClaimsRow {
    fn from(claims: Claims) -> Self {
        Self {
            remaining_seconds: claims.remaining_ttl_seconds(),
            issued_at: claims.issued_at(),
            expires_at: claims.expires_at(),
            role: claims.role,
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}

/// Execute token commands
pub async fn execute(
    args: &TokenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let secret = SecretStore::new(config.auth.jwt_secret.clone());

    match &args.command {
        TokenCommand::Issue {
            user_id,
            email,
            role,
            ttl_hours,
        } => {
            let ttl = match ttl_hours {
                Some(hours) => Duration::try_hours(*hours).ok_or_else(|| {
                    AppError::validation(format!("--ttl-hours is out of range: {hours}"))
                })?,
                None => config.auth.token_ttl()?,
            };
            let subject = User {
                id: user_id.clone(),
                email: email.clone(),
                display_name: email.clone(),
                role: Some(*role),
                password_hash: String::new(),
                created_at: Utc::now(),
            };

            let issued = JwtEncoder::new(secret).issue(&subject, ttl)?;
            tracing::info!(user_id = %user_id, role = %role, "Token issued from CLI");

            match format {
                OutputFormat::Json => output::print_item(
                    &IssuedRow {
                        token: issued.token,
                        expires_at: DateTime::from_timestamp(issued.expires_at, 0)
                            .unwrap_or(DateTime::<Utc>::MIN_UTC),
                    },
                    format,
                )?,
                OutputFormat::Table => output::print_value(&issued.token),
            }
        }
        TokenCommand::Inspect { token } => {
            let claims = JwtDecoder::new(secret).validate(token)?;
            output::print_item(&ClaimsRow::from(claims), format)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = secret.to_string();
        config
    }

    #[tokio::test]
    async fn test_issue_refuses_default_secret() {
        let args = TokenArgs {
            command: TokenCommand::Issue {
                user_id: "u-1".to_string(),
                email: "u@example.com".to_string(),
                role: UserRole::Admin,
                ttl_hours: None,
            },
        };
        let err = execute(&args, &AppConfig::default(), OutputFormat::Table)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_issue_rejects_out_of_range_ttl() {
        let issue = |ttl_hours| TokenArgs {
            command: TokenCommand::Issue {
                user_id: "u-1".to_string(),
                email: "u@example.com".to_string(),
                role: UserRole::User,
                ttl_hours,
            },
        };
        let valid = config("a-valid-signing-secret-0123");

        let err = execute(&issue(Some(i64::MAX)), &valid, OutputFormat::Table)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = execute(&issue(Some(3_000_000_000)), &valid, OutputFormat::Table)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);

        let mut huge_default = valid;
        huge_default.auth.token_ttl_hours = u64::MAX;
        let err = execute(&issue(None), &huge_default, OutputFormat::Table)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_inspect_rejects_foreign_token() {
        let user = User {
            id: "u-1".to_string(),
            email: "u@example.com".to_string(),
            display_name: "U".to_string(),
            role: None,
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let issued = JwtEncoder::new(SecretStore::new("one-signing-secret-0001"))
            .issue(&user, Duration::hours(1))
            .unwrap();

        let args = TokenArgs {
            command: TokenCommand::Inspect {
                token: issued.token,
            },
        };
        let err = execute(&args, &config("another-signing-secret-02"), OutputFormat::Json)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
