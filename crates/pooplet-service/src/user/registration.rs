//! Runtime switch for self-service registration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether new accounts may register themselves.
///
/// Seeded from configuration and toggled by admins at runtime. Clones
/// share the same flag.
#[derive(Debug, Clone)]
pub struct RegistrationGate(Arc<AtomicBool>);

impl RegistrationGate {
    /// Creates a gate in the given state.
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    /// Returns whether registration is open.
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Opens or closes registration.
    pub fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::Release);
    }
}

impl Default for RegistrationGate {
    fn default() -> Self {
        Self::new(true)
    }
}
