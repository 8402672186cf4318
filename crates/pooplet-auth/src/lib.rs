//! # pooplet-auth
//!
//! Authentication and authorization core for Pooplet. Everything here is
//! synchronous and free of I/O: lookups (existing emails, admin counts)
//! are done by the caller and passed in as plain values.
//!
//! ## Modules
//!
//! - `password`: password policy and Argon2id hashing
//! - `secret`: signing-secret validation and the shared secret store
//! - `jwt`: session token issuance, validation, and bearer header parsing
//! - `rbac`: role checks and the last-administrator guard
//! - `error`: typed errors for each of the above

pub mod error;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod secret;

pub use error::{
    AuthzError, BearerError, InvalidSecretError, IssuanceError, PolicyError, ValidationError,
};
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::RbacEnforcer;
pub use secret::{SecretGuard, SecretStore};
