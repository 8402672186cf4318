//! RBAC enforcement logic: route role requirements and role-mutation invariants.

use pooplet_entity::user::UserRole;

use crate::error::AuthzError;
use crate::jwt::Claims;

/// Enforces role requirements and the account-mutation safety rules.
///
/// Stateless. Every input, including the administrator count, is
/// supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer;

impl RbacEnforcer {
    /// Creates a new enforcer.
    pub fn new() -> Self {
        Self
    }

    /// Checks that the token's role is exactly `required`.
    ///
    /// There is no hierarchy between roles.
    pub fn authorize(&self, claims: &Claims, required: UserRole) -> Result<(), AuthzError> {
        if claims.role == required {
            Ok(())
        } else {
            Err(AuthzError::Forbidden { required })
        }
    }

    /// Refuses destructive operations an actor aims at its own account.
    pub fn forbid_self_mutation(&self, actor_id: &str, target_id: &str) -> Result<(), AuthzError> {
        if actor_id == target_id {
            Err(AuthzError::SelfTargetForbidden)
        } else {
            Ok(())
        }
    }

    /// Refuses a role change that would leave no administrator.
    ///
    /// `admin_count` must be read before the mutation is applied, and this
    /// check must run before anything is written. Two concurrent
    /// downgrades can both observe the same count; callers that need a
    /// hard guarantee must serialize the read-check-write themselves.
    pub fn guard_last_admin(
        &self,
        current_role: UserRole,
        new_role: UserRole,
        admin_count: u64,
    ) -> Result<(), AuthzError> {
        match (current_role, new_role) {
            (UserRole::Admin, UserRole::User) if admin_count <= 1 => {
                Err(AuthzError::LastAdminProtected)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole) -> Claims {
        Claims {
            user_id: "u-1".to_string(),
            email: "u@example.com".to_string(),
            role,
            exp: i64::MAX,
            iat: 0,
        }
    }

    #[test]
    fn test_authorize_exact_role() {
        let rbac = RbacEnforcer::new();
        assert!(rbac.authorize(&claims(UserRole::Admin), UserRole::Admin).is_ok());
        assert!(rbac.authorize(&claims(UserRole::User), UserRole::User).is_ok());
        assert_eq!(
            rbac.authorize(&claims(UserRole::User), UserRole::Admin),
            Err(AuthzError::Forbidden {
                required: UserRole::Admin
            })
        );
    }

    #[test]
    fn test_forbid_self_mutation() {
        let rbac = RbacEnforcer::new();
        assert_eq!(
            rbac.forbid_self_mutation("x", "x"),
            Err(AuthzError::SelfTargetForbidden)
        );
        assert!(rbac.forbid_self_mutation("x", "y").is_ok());
    }

    #[test]
    fn test_last_admin_downgrade_blocked() {
        let rbac = RbacEnforcer::new();
        assert_eq!(
            rbac.guard_last_admin(UserRole::Admin, UserRole::User, 1),
            Err(AuthzError::LastAdminProtected)
        );
        assert_eq!(
            rbac.guard_last_admin(UserRole::Admin, UserRole::User, 0),
            Err(AuthzError::LastAdminProtected)
        );
        assert!(rbac.guard_last_admin(UserRole::Admin, UserRole::User, 2).is_ok());
    }

    #[test]
    fn test_promotions_and_no_ops_pass() {
        let rbac = RbacEnforcer::new();
        for count in [0, 1, 5] {
            assert!(rbac.guard_last_admin(UserRole::User, UserRole::Admin, count).is_ok());
            assert!(rbac.guard_last_admin(UserRole::User, UserRole::User, count).is_ok());
            assert!(rbac.guard_last_admin(UserRole::Admin, UserRole::Admin, count).is_ok());
        }
    }
}
