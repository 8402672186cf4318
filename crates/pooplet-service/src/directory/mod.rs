//! The user directory: the persistence collaborator the account flows use.

pub mod memory;

use async_trait::async_trait;

use pooplet_core::result::AppResult;
use pooplet_entity::user::{CreateUser, User, UserRole};

pub use memory::MemoryUserDirectory;

/// Lookup and mutation of user records.
///
/// The auth core never calls this; services read from it and pass plain
/// values (existing users, admin counts) into the core. Implementations
/// must enforce email uniqueness in [`create`](UserDirectory::create).
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by login email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// Count users whose effective role is `Admin`.
    async fn count_admins(&self) -> AppResult<u64>;

    /// Count all users.
    async fn count_users(&self) -> AppResult<u64>;

    /// List all users, oldest first.
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create a user. Fails with a conflict if the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Set a user's role. Returns `None` if the user does not exist.
    async fn update_role(&self, id: &str, role: UserRole) -> AppResult<Option<User>>;

    /// Delete a user. Returns `true` if deleted.
    async fn delete(&self, id: &str) -> AppResult<bool>;
}
