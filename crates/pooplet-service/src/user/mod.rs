//! User account flows: self-service auth, admin management, bootstrap.

pub mod admin;
pub mod bootstrap;
pub mod registration;
pub mod service;

use std::sync::Arc;

use pooplet_auth::PasswordHasher;
use pooplet_core::error::AppError;
use pooplet_core::result::AppResult;

pub use admin::{AdminUserService, CreateUserRequest};
pub use bootstrap::bootstrap_initial_admin;
pub use registration::RegistrationGate;
pub use service::{AuthResponse, AuthService, LoginRequest, RegisterRequest};

/// Hashes a password on the blocking pool.
pub(crate) async fn hash_password(hasher: &Arc<PasswordHasher>, password: &str) -> AppResult<String> {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hasher.hash_password(&password))
        .await
        .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
}

/// Verifies a password on the blocking pool. A failed task never matches.
pub(crate) async fn verify_password(
    hasher: &Arc<PasswordHasher>,
    password: &str,
    hash: &str,
) -> bool {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
        .await
        .unwrap_or(false)
}
