//! In-memory user directory backed by `dashmap`.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use pooplet_core::error::AppError;
use pooplet_core::result::AppResult;
use pooplet_entity::user::{CreateUser, User, UserRole};

use super::UserDirectory;

/// Process-local [`UserDirectory`] for embedding and tests.
///
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserDirectory {
    /// User ID → user.
    users: Arc<DashMap<String, User>>,
    /// Email → user ID, for uniqueness.
    emails: Arc<DashMap<String, String>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully formed user record as-is.
    ///
    /// Used to seed rows that the normal create path would not produce,
    /// such as users without a role.
    pub fn insert(&self, user: User) -> AppResult<()> {
        match self.emails.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Email is already in use")),
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
                self.users.insert(user.id.clone(), user);
                Ok(())
            }
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|id| id.value().clone()) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.value().clone()))
    }

    async fn count_admins(&self) -> AppResult<u64> {
        Ok(self.users.iter().filter(|u| u.is_admin()).count() as u64)
    }

    async fn count_users(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let user = User::from_create(data);
        self.insert(user.clone())?;
        Ok(user)
    }

    async fn update_role(&self, id: &str, role: UserRole) -> AppResult<Option<User>> {
        Ok(self.users.get_mut(id).map(|mut user| {
            user.role = Some(role);
            user.clone()
        }))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        match self.users.remove(id) {
            Some((_, user)) => {
                self.emails.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
