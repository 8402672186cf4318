//! Self-service authentication: registration, login, token checks, profile.

use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};
use validator::Validate;

use pooplet_auth::jwt::extract_bearer_token;
use pooplet_auth::{IssuanceError, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator};
use pooplet_core::error::AppError;
use pooplet_core::result::AppResult;
use pooplet_entity::user::{CreateUser, User, UserProfile, UserRole};

use super::registration::RegistrationGate;
use crate::context::RequestContext;
use crate::directory::UserDirectory;

/// Returned for both unknown emails and wrong passwords.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Self-service registration request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Plaintext password, checked against the password policy.
    pub password: String,
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login email.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Session token.
    pub token: String,
    /// Token expiry (seconds since epoch).
    pub expires_at: i64,
    /// The authenticated user.
    pub user: UserProfile,
}

/// Registration, login, and request authentication.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User directory.
    directory: Arc<dyn UserDirectory>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    validator: Arc<PasswordValidator>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Token validator.
    decoder: Arc<JwtDecoder>,
    /// Registration switch.
    registration: RegistrationGate,
    /// Session lifetime.
    token_ttl: Duration,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        registration: RegistrationGate,
        token_ttl: Duration,
    ) -> Self {
        Self {
            directory,
            hasher,
            validator,
            encoder,
            decoder,
            registration,
            token_ttl,
        }
    }

    /// Registers a new account with role `User` and signs it in.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<AuthResponse> {
        if !self.registration.is_enabled() {
            debug!(email = %req.email, "Registration rejected: registration disabled");
            return Err(AppError::authorization("Registration is currently disabled"));
        }

        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid registration request: {e}")))?;
        self.validator.validate(&req.password)?;

        if self.directory.find_by_email(&req.email).await?.is_some() {
            debug!(email = %req.email, "Registration rejected: email taken");
            return Err(AppError::conflict("Email is already registered"));
        }

        // No account is created if a token could not be issued for it.
        self.encoder
            .check_secret()
            .map_err(|e| issuance_failed(e, &req.email))?;

        let password_hash = super::hash_password(&self.hasher, &req.password).await?;
        let user = self
            .directory
            .create(CreateUser {
                email: req.email,
                password_hash,
                display_name: req.name,
                role: UserRole::User,
            })
            .await?;

        info!(user_id = %user.id, email = %user.email, "User registered");

        self.sign_in(&user)
    }

    /// Verifies credentials and issues a session token.
    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        req.validate()
            .map_err(|e| AppError::validation(format!("Invalid login request: {e}")))?;

        let Some(user) = self.directory.find_by_email(&req.email).await? else {
            debug!(email = %req.email, "Login rejected: unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !super::verify_password(&self.hasher, &req.password, &user.password_hash).await {
            debug!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, role = %user.effective_role(), "User logged in");

        self.sign_in(&user)
    }

    /// Resolves an `Authorization` header value into a request context.
    pub fn authenticate(&self, authorization: Option<&str>) -> AppResult<RequestContext> {
        let token = extract_bearer_token(authorization).map_err(|e| {
            debug!(error = %e, "Authorization header rejected");
            AppError::from(e)
        })?;

        let claims = self.decoder.validate(token).map_err(|e| {
            debug!(error = %e, "Token rejected");
            AppError::from(e)
        })?;

        Ok(RequestContext::new(claims))
    }

    /// Returns the current user's profile.
    pub async fn profile(&self, ctx: &RequestContext) -> AppResult<UserProfile> {
        self.directory
            .find_by_id(ctx.user_id())
            .await?
            .map(|user| UserProfile::from(&user))
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Returns whether self-service registration is open.
    pub fn registration_enabled(&self) -> bool {
        self.registration.is_enabled()
    }

    fn sign_in(&self, user: &User) -> AppResult<AuthResponse> {
        let issued = self
            .encoder
            .issue(user, self.token_ttl)
            .map_err(|e| issuance_failed(e, &user.email))?;

        Ok(AuthResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: UserProfile::from(user),
        })
    }
}

fn issuance_failed(err: IssuanceError, email: &str) -> AppError {
    match &err {
        IssuanceError::WeakSecret(reason) => {
            error!(email = %email, reason = %reason, "Refusing to issue token: signing secret is invalid");
        }
        IssuanceError::ExpiryOutOfRange => {
            error!(email = %email, "Token lifetime is out of range");
        }
        IssuanceError::Signing(reason) => {
            error!(email = %email, reason = %reason, "Token signing failed");
        }
    }
    AppError::from(err)
}
