//! Rejects signing secrets that would make tokens forgeable.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use pooplet_core::config::auth::DEFAULT_JWT_SECRET;

use crate::error::InvalidSecretError;

/// Minimum secret length, in bytes.
pub const MIN_SECRET_LENGTH: usize = 16;

/// Validates the token-signing secret.
///
/// Run once at startup before accepting traffic, and again on every token
/// issuance so a secret swapped at runtime fails closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretGuard;

impl SecretGuard {
    /// Fails when the secret is the shipped placeholder or shorter than
    /// [`MIN_SECRET_LENGTH`] bytes.
    pub fn validate(secret: &str) -> Result<(), InvalidSecretError> {
        if secret == DEFAULT_JWT_SECRET {
            return Err(InvalidSecretError::DefaultValue);
        }
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(InvalidSecretError::TooShort {
                length: secret.len(),
                min: MIN_SECRET_LENGTH,
            });
        }
        Ok(())
    }

    /// Generates a random secret from `bytes` bytes of OS randomness,
    /// base64-encoded. Never uses fewer than [`MIN_SECRET_LENGTH`] bytes.
    pub fn generate(bytes: usize) -> String {
        let mut buf = vec![0u8; bytes.max(MIN_SECRET_LENGTH)];
        OsRng.fill_bytes(&mut buf);
        STANDARD.encode(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_default() {
        assert_eq!(
            SecretGuard::validate(DEFAULT_JWT_SECRET),
            Err(InvalidSecretError::DefaultValue)
        );
    }

    #[test]
    fn test_rejects_short() {
        assert_eq!(
            SecretGuard::validate(""),
            Err(InvalidSecretError::TooShort { length: 0, min: 16 })
        );
        assert_eq!(
            SecretGuard::validate("fifteen-chars!!"),
            Err(InvalidSecretError::TooShort { length: 15, min: 16 })
        );
    }

    #[test]
    fn test_generated_secret_passes() {
        let a = SecretGuard::generate(32);
        let b = SecretGuard::generate(32);
        assert_ne!(a, b);
        assert_eq!(SecretGuard::validate(&a), Ok(()));
        assert!(SecretGuard::validate(&SecretGuard::generate(1)).is_ok());
    }

    #[test]
    fn test_accepts_sixteen_bytes() {
        assert_eq!(SecretGuard::validate("sixteen-chars!!!"), Ok(()));
        assert_eq!(
            SecretGuard::validate("a-considerably-longer-production-secret"),
            Ok(())
        );
    }
}
