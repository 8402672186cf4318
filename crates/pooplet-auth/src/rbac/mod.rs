//! Role-based access control (RBAC) enforcement.

pub mod enforcer;

pub use enforcer::RbacEnforcer;
