//! Admin user management: listing, creation, role changes, deletion, and
//! the registration switch.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use pooplet_auth::{AuthzError, PasswordHasher, PasswordValidator, RbacEnforcer};
use pooplet_core::error::AppError;
use pooplet_core::result::AppResult;
use pooplet_entity::user::{CreateUser, UserProfile, UserRole};

use super::registration::RegistrationGate;
use crate::context::RequestContext;
use crate::directory::UserDirectory;

/// Request to create a user with an explicit role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login email (unique).
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    /// Role assignment.
    #[serde(default)]
    pub role: UserRole,
}

/// Handles administrative user management operations.
///
/// Every operation requires the `Admin` role.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User directory.
    directory: Arc<dyn UserDirectory>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
    /// Registration switch, shared with the auth service.
    registration: RegistrationGate,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
        registration: RegistrationGate,
    ) -> Self {
        Self {
            directory,
            hasher,
            validator,
            rbac,
            registration,
        }
    }

    /// Lists all users, oldest first.
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<UserProfile>> {
        self.require_admin(ctx)?;

        let users = self.directory.list_users().await?;
        Ok(users.iter().map(UserProfile::from).collect())
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: &str) -> AppResult<UserProfile> {
        self.require_admin(ctx)?;

        self.directory
            .find_by_id(user_id)
            .await?
            .map(|user| UserProfile::from(&user))
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a user with the requested role.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> AppResult<UserProfile> {
        self.require_admin(ctx)?;

        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid user: {e}")))?;
        self.validator.validate(&req.password)?;

        if self.directory.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("Email is already in use"));
        }

        let password_hash = super::hash_password(&self.hasher, &req.password).await?;
        let user = self
            .directory
            .create(CreateUser {
                email: req.email,
                password_hash,
                display_name: req.name,
                role: req.role,
            })
            .await?;

        info!(
            admin_id = %ctx.user_id(),
            new_user_id = %user.id,
            email = %user.email,
            role = %user.effective_role(),
            "User created by admin"
        );

        Ok(UserProfile::from(&user))
    }

    /// Changes a user's role.
    ///
    /// A downgrade that would leave no administrator is refused before
    /// anything is written. The count and the write are not atomic.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        new_role: UserRole,
    ) -> AppResult<UserProfile> {
        self.require_admin(ctx)?;

        let target = self
            .directory
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let current_role = target.effective_role();

        if new_role == UserRole::User {
            let admin_count = self.directory.count_admins().await?;
            self.rbac
                .guard_last_admin(current_role, new_role, admin_count)
                .inspect_err(|_| {
                    warn!(
                        admin_id = %ctx.user_id(),
                        target_id = %user_id,
                        admin_count,
                        "Refused to downgrade the last admin"
                    );
                })?;
        }

        let updated = self
            .directory
            .update_role(user_id, new_role)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(
            admin_id = %ctx.user_id(),
            target_id = %user_id,
            old_role = %current_role,
            new_role = %new_role,
            "User role changed"
        );

        Ok(UserProfile::from(&updated))
    }

    /// Deletes a user. Admins cannot delete themselves.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: &str) -> AppResult<()> {
        self.require_admin(ctx)?;
        self.rbac.forbid_self_mutation(ctx.user_id(), user_id)?;

        if !self.directory.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(admin_id = %ctx.user_id(), target_id = %user_id, "User deleted by admin");

        Ok(())
    }

    /// Returns whether self-service registration is open.
    pub fn registration_enabled(&self, ctx: &RequestContext) -> AppResult<bool> {
        self.require_admin(ctx)?;
        Ok(self.registration.is_enabled())
    }

    /// Opens or closes self-service registration.
    pub fn set_registration_enabled(&self, ctx: &RequestContext, enabled: bool) -> AppResult<()> {
        self.require_admin(ctx)?;
        self.registration.set(enabled);

        info!(admin_id = %ctx.user_id(), enabled, "Registration setting changed");

        Ok(())
    }

    fn require_admin(&self, ctx: &RequestContext) -> Result<(), AuthzError> {
        self.rbac.authorize(&ctx.claims, UserRole::Admin)
    }
}
