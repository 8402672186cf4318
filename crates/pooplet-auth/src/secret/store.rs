//! Shared, swappable holder for the token-signing secret.

use std::sync::{Arc, RwLock};

use super::guard::SecretGuard;
use crate::error::InvalidSecretError;

/// The signing secret shared by the token encoder and decoder.
///
/// Cloning shares the underlying value. Reads are concurrent; [`rotate`]
/// takes the write lock and is meant for startup and tests only.
///
/// [`rotate`]: SecretStore::rotate
#[derive(Clone)]
pub struct SecretStore {
    secret: Arc<RwLock<String>>,
}

impl std::fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretStore")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl SecretStore {
    /// Wraps a secret without validating it.
    ///
    /// Validation happens at issuance time; see [`SecretStore::checked`]
    /// for the startup path.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::new(RwLock::new(secret.into())),
        }
    }

    /// Wraps a secret after running it through [`SecretGuard`].
    pub fn checked(secret: impl Into<String>) -> Result<Self, InvalidSecretError> {
        let secret = secret.into();
        SecretGuard::validate(&secret)?;
        Ok(Self::new(secret))
    }

    /// Returns a copy of the current secret.
    pub fn current(&self) -> String {
        self.secret
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the secret for every holder of this store.
    pub fn rotate(&self, secret: impl Into<String>) {
        let mut guard = self
            .secret
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = secret.into();
    }

    /// Runs [`SecretGuard`] against the current secret.
    pub fn validate(&self) -> Result<(), InvalidSecretError> {
        let secret = self
            .secret
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        SecretGuard::validate(&secret)
    }
}
