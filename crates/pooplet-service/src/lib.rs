//! # pooplet-service
//!
//! Account flows for Pooplet. Each service drives the auth core
//! (`pooplet-auth`) with values looked up through a [`UserDirectory`],
//! the persistence collaborator.
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod directory;
pub mod state;
pub mod user;

pub use context::RequestContext;
pub use directory::{MemoryUserDirectory, UserDirectory};
pub use state::AuthState;
pub use user::{AdminUserService, AuthService, RegistrationGate};
