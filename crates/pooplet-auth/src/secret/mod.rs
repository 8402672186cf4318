//! Token-signing secret validation and sharing.

pub mod guard;
pub mod store;

pub use guard::{MIN_SECRET_LENGTH, SecretGuard};
pub use store::SecretStore;
