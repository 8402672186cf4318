//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use pooplet_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
///
/// Hashing is deliberately slow; callers on an async runtime should run it
/// on a blocking thread.
#[derive(Debug, Clone)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    ///
    /// The result is a self-contained PHC string (algorithm, parameters,
    /// salt, and digest).
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// A malformed hash never matches.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("Abc1234567").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("Abc1234567", &hash));
        assert!(!hasher.verify_password("Abc1234568", &hash));
    }

    #[test]
    fn test_salted() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("Abc1234567").unwrap();
        let b = hasher.hash_password("Abc1234567").unwrap();
        assert_ne!(a, b);
        assert!(hasher.verify_password("Abc1234567", &b));
    }

    #[test]
    fn test_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();
        assert!(!hasher.verify_password("Abc1234567", ""));
        assert!(!hasher.verify_password("Abc1234567", "not-a-hash"));
        assert!(!hasher.verify_password("Abc1234567", "$argon2id$v=19$garbage"));
    }
}
