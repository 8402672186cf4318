//! Session token validation.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};

use pooplet_entity::user::UserRole;

use super::claims::Claims;
use crate::error::ValidationError;
use crate::secret::SecretStore;

/// Validates session tokens against the current signing secret.
#[derive(Clone)]
pub struct JwtDecoder {
    /// Shared signing secret.
    secret: SecretStore,
    /// Signature-only validation; claim checks are done here.
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder verifying with the given secret store.
    pub fn new(secret: SecretStore) -> Self {
        // The library only checks the signature and algorithm. Expiry is
        // checked below with an exact `now >= exp` boundary and no leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self { secret, validation }
    }

    /// Decodes and validates a token at the current time.
    pub fn validate(&self, token: &str) -> Result<Claims, ValidationError> {
        self.validate_at(token, Utc::now())
    }

    /// Decodes and validates a token as if the current time were `now`.
    ///
    /// Checks, in order:
    /// 1. Signature against the current secret
    /// 2. `user_id` present and non-empty
    /// 3. `email` present and non-empty
    /// 4. `exp` present and `now < exp`
    ///
    /// A missing or unrecognised `role` is read as `User`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, ValidationError> {
        let secret = self.secret.current();
        let data = decode::<Map<String, Value>>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            JwtErrorKind::InvalidSignature | JwtErrorKind::InvalidAlgorithm => {
                ValidationError::BadSignature
            }
            _ => ValidationError::Malformed,
        })?;
        let raw = data.claims;

        let user_id = non_empty_str(&raw, "user_id").ok_or(ValidationError::MissingSubject)?;
        let email = non_empty_str(&raw, "email").ok_or(ValidationError::MissingEmail)?;
        let exp = numeric_date(&raw, "exp").ok_or(ValidationError::Malformed)?;
        let iat = numeric_date(&raw, "iat").unwrap_or(0);

        let role = raw
            .get("role")
            .and_then(Value::as_str)
            .map(UserRole::parse_or_default)
            .unwrap_or_default();

        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            role,
            exp,
            iat,
        };

        if claims.is_expired_at(now.timestamp()) {
            return Err(ValidationError::Expired);
        }

        Ok(claims)
    }
}

fn non_empty_str<'a>(claims: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    claims
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// JWT NumericDate: integer seconds, or fractional seconds truncated.
fn numeric_date(claims: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = claims.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}
