//! Session token creation with secret checking and configurable TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use pooplet_entity::user::User;

use super::claims::Claims;
use crate::error::IssuanceError;
use crate::secret::{SecretGuard, SecretStore};

/// Creates signed HS256 session tokens.
#[derive(Debug, Clone)]
pub struct JwtEncoder {
    /// Shared signing secret.
    secret: SecretStore,
}

/// Result of a successful issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// The encoded token.
    pub token: String,
    /// Expiration timestamp (seconds since epoch).
    pub expires_at: i64,
}

impl JwtEncoder {
    /// Creates a new encoder signing with the given secret store.
    pub fn new(secret: SecretStore) -> Self {
        Self { secret }
    }

    /// Fails if issuance would currently be refused for a weak secret.
    ///
    /// Lets callers bail out before side effects such as persisting a new
    /// account. [`issue_at`](Self::issue_at) still checks on its own.
    pub fn check_secret(&self) -> Result<(), IssuanceError> {
        self.secret.validate().map_err(IssuanceError::from)
    }

    /// Issues a token for `user` that expires `ttl` from now.
    pub fn issue(&self, user: &User, ttl: Duration) -> Result<IssuedToken, IssuanceError> {
        self.issue_at(user, ttl, Utc::now())
    }

    /// Issues a token as if the current time were `now`.
    ///
    /// The secret is checked before anything is signed; a weak secret
    /// yields [`IssuanceError::WeakSecret`] and no token. An unset role is
    /// issued as `User`.
    pub fn issue_at(
        &self,
        user: &User,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, IssuanceError> {
        // Read once so the checked value is the signing value.
        let secret = self.secret.current();
        SecretGuard::validate(&secret)?;

        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or(IssuanceError::ExpiryOutOfRange)?
            .timestamp();
        let claims = Claims {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.effective_role(),
            exp: expires_at,
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| IssuanceError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}
