//! Creation of the first administrator on an empty directory.

use std::sync::Arc;

use tracing::info;

use pooplet_auth::{PasswordHasher, PasswordValidator};
use pooplet_core::error::AppError;
use pooplet_core::result::AppResult;
use pooplet_entity::user::{CreateUser, UserProfile, UserRole};

use crate::directory::UserDirectory;

/// Creates an `Admin` account if the directory has no users yet.
///
/// Returns `Ok(None)` when users already exist. The email must be
/// non-empty and the password must pass the password policy.
pub async fn bootstrap_initial_admin(
    directory: &Arc<dyn UserDirectory>,
    hasher: &Arc<PasswordHasher>,
    validator: &PasswordValidator,
    email: &str,
    password: &str,
    name: &str,
) -> AppResult<Option<UserProfile>> {
    if directory.count_users().await? > 0 {
        return Ok(None);
    }

    if email.trim().is_empty() {
        return Err(AppError::validation("Initial admin email is required"));
    }
    validator.validate(password)?;

    let password_hash = super::hash_password(hasher, password).await?;
    let admin = directory
        .create(CreateUser {
            email: email.to_string(),
            password_hash,
            display_name: name.to_string(),
            role: UserRole::Admin,
        })
        .await?;

    info!(user_id = %admin.id, email = %admin.email, "Initial admin created");

    Ok(Some(UserProfile::from(&admin)))
}
