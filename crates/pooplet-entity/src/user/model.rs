//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::UserRole;

/// A registered user (the authenticated identity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque unique identifier.
    pub id: String,
    /// Unique login email.
    pub email: String,
    /// Human-readable display name.
    pub display_name: String,
    /// Assigned role. Rows written before roles existed carry none.
    #[serde(default)]
    pub role: Option<UserRole>,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a persisted user from creation data, assigning a fresh ID.
    pub fn from_create(data: CreateUser) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: data.email,
            display_name: data.display_name,
            role: Some(data.role),
            password_hash: data.password_hash,
            created_at: Utc::now(),
        }
    }

    /// The role in force for this user; an unset role means `User`.
    pub fn effective_role(&self) -> UserRole {
        self.role.unwrap_or_default()
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.effective_role().is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub display_name: String,
    /// Assigned role.
    pub role: UserRole,
}

/// Public view of a user, safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User ID.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Effective role.
    pub role: UserRole,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.display_name.clone(),
            role: user.effective_role(),
            created_at: user.created_at,
        }
    }
}
