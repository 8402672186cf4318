//! Wiring of the auth core and account services from configuration.

use std::sync::Arc;

use tracing::{error, info, warn};

use pooplet_auth::{
    JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator, RbacEnforcer, SecretStore,
};
use pooplet_core::config::AppConfig;
use pooplet_core::error::AppError;
use pooplet_core::result::AppResult;

use crate::directory::UserDirectory;
use crate::user::{AdminUserService, AuthService, RegistrationGate, bootstrap_initial_admin};

/// Shared auth components and the services built on them.
///
/// All fields are `Arc`-wrapped or cheaply cloneable.
#[derive(Debug, Clone)]
pub struct AuthState {
    // ── Auth core ────────────────────────────────────────────
    /// Signing secret shared by encoder and decoder
    pub secret: SecretStore,
    /// JWT token encoder
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (Argon2)
    pub password_hasher: Arc<PasswordHasher>,
    /// Password policy
    pub password_validator: Arc<PasswordValidator>,
    /// Role-based access control enforcer
    pub rbac_enforcer: Arc<RbacEnforcer>,

    // ── Persistence ──────────────────────────────────────────
    /// User directory
    pub directory: Arc<dyn UserDirectory>,

    // ── Services ─────────────────────────────────────────────
    /// Registration switch
    pub registration: RegistrationGate,
    /// Registration, login, authentication
    pub auth_service: Arc<AuthService>,
    /// Admin user management
    pub admin_service: Arc<AdminUserService>,
}

impl AuthState {
    /// Builds the state without the startup checks.
    ///
    /// A weak secret is accepted here; issuance will still refuse it. An
    /// out-of-range token lifetime is a configuration error.
    pub fn new(config: &AppConfig, directory: Arc<dyn UserDirectory>) -> AppResult<Self> {
        let token_ttl = config.auth.token_ttl()?;
        let secret = SecretStore::new(config.auth.jwt_secret.clone());
        let jwt_encoder = Arc::new(JwtEncoder::new(secret.clone()));
        let jwt_decoder = Arc::new(JwtDecoder::new(secret.clone()));
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new());
        let rbac_enforcer = Arc::new(RbacEnforcer::new());
        let registration = RegistrationGate::new(config.auth.registration_enabled);

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&directory),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
            registration.clone(),
            token_ttl,
        ));
        let admin_service = Arc::new(AdminUserService::new(
            Arc::clone(&directory),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
            Arc::clone(&rbac_enforcer),
            registration.clone(),
        ));

        Ok(Self {
            secret,
            jwt_encoder,
            jwt_decoder,
            password_hasher,
            password_validator,
            rbac_enforcer,
            directory,
            registration,
            auth_service,
            admin_service,
        })
    }

    /// Builds the state for a running process.
    ///
    /// Fails if the signing secret is unusable. When bootstrap credentials
    /// are configured and the directory is empty, the initial admin is
    /// created; a bootstrap failure is logged and does not stop startup.
    pub async fn initialize(
        config: &AppConfig,
        directory: Arc<dyn UserDirectory>,
    ) -> AppResult<Self> {
        if let Err(e) = SecretStore::checked(config.auth.jwt_secret.clone()) {
            error!(
                error = %e,
                "JWT secret is invalid; set POOPLET_AUTH__JWT_SECRET to a random value of at least 16 bytes"
            );
            return Err(AppError::from(e));
        }

        let state = Self::new(config, directory)?;

        if let Some((email, password)) = config.bootstrap.credentials() {
            match bootstrap_initial_admin(
                &state.directory,
                &state.password_hasher,
                &state.password_validator,
                email,
                password,
                &config.bootstrap.initial_admin_name,
            )
            .await
            {
                Ok(Some(_)) => {}
                Ok(None) => info!("Users already exist; skipping initial admin bootstrap"),
                Err(e) => warn!(error = %e, "Initial admin bootstrap failed"),
            }
        }

        Ok(state)
    }
}
