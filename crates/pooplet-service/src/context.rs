//! Request context carrying the authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pooplet_auth::Claims;
use pooplet_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from validated token claims and passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Validated token claims.
    pub claims: Claims,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(claims: Claims) -> Self {
        Self {
            claims,
            request_time: Utc::now(),
        }
    }

    /// The authenticated user's ID.
    pub fn user_id(&self) -> &str {
        &self.claims.user_id
    }

    /// The role carried by the token.
    pub fn role(&self) -> UserRole {
        self.claims.role
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.claims.role.is_admin()
    }
}
