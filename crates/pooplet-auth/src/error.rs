//! Typed errors for the auth core.
//!
//! Each concern returns its own enum so callers (and tests) can tell the
//! cases apart. All of them convert into [`AppError`] with the error kind
//! that decides the transport status.

use thiserror::Error;

use pooplet_core::error::{AppError, ErrorKind};
use pooplet_entity::user::UserRole;

/// A password violates the strength policy. Returned verbatim to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Fewer characters than the minimum.
    #[error("password must be at least {min} characters long")]
    TooShort {
        /// Required minimum length.
        min: usize,
    },
    /// No upper-case letter.
    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,
    /// No lower-case letter.
    #[error("password must contain at least one lowercase letter")]
    MissingLowercase,
    /// No decimal digit.
    #[error("password must contain at least one digit")]
    MissingDigit,
}

/// The token-signing secret is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSecretError {
    /// The secret is still the shipped placeholder.
    #[error("invalid JWT secret: must be changed from default value")]
    DefaultValue,
    /// The secret is below the minimum length.
    #[error("invalid JWT secret: {length} bytes, at least {min} required")]
    TooShort {
        /// Actual length in bytes.
        length: usize,
        /// Required minimum length in bytes.
        min: usize,
    },
}

/// A token could not be issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssuanceError {
    /// The configured secret failed the guard; nothing was signed.
    #[error("refusing to issue token: {0}")]
    WeakSecret(#[from] InvalidSecretError),
    /// `now + ttl` is not a representable timestamp.
    #[error("token lifetime is out of range")]
    ExpiryOutOfRange,
    /// The JWT library failed to sign the claims.
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// A presented token was rejected.
///
/// Every variant means the same thing to the client (re-authenticate); the
/// distinction exists for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `now >= exp`.
    #[error("token has expired")]
    Expired,
    /// Signature does not verify against the current secret.
    #[error("invalid token signature")]
    BadSignature,
    /// `user_id` claim absent, empty, or not a string.
    #[error("invalid token: missing user_id")]
    MissingSubject,
    /// `email` claim absent, empty, or not a string.
    #[error("invalid token: missing email")]
    MissingEmail,
    /// Not a structurally valid token.
    #[error("invalid token format")]
    Malformed,
}

/// The `Authorization` header does not carry a usable bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BearerError {
    /// No header at all.
    #[error("Authorization header required")]
    MissingHeader,
    /// Wrong scheme, wrong shape, or empty token.
    #[error("Invalid authorization header format")]
    InvalidFormat,
}

/// An operation was refused by access control. No state was changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// The caller's role is not the one the route requires.
    #[error("{required} access required")]
    Forbidden {
        /// Role the operation requires.
        required: UserRole,
    },
    /// The actor targeted itself with a destructive operation.
    #[error("cannot perform this operation on your own account")]
    SelfTargetForbidden,
    /// The mutation would leave the system without an administrator.
    #[error("cannot downgrade the last admin to user")]
    LastAdminProtected,
}

impl From<PolicyError> for AppError {
    fn from(err: PolicyError) -> Self {
        AppError::with_source(ErrorKind::Validation, err.to_string(), err)
    }
}

impl From<InvalidSecretError> for AppError {
    fn from(err: InvalidSecretError) -> Self {
        AppError::with_source(ErrorKind::Configuration, err.to_string(), err)
    }
}

impl From<IssuanceError> for AppError {
    fn from(err: IssuanceError) -> Self {
        let kind = match err {
            IssuanceError::WeakSecret(_) | IssuanceError::ExpiryOutOfRange => {
                ErrorKind::Configuration
            }
            IssuanceError::Signing(_) => ErrorKind::Internal,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::with_source(ErrorKind::Authentication, err.to_string(), err)
    }
}

impl From<BearerError> for AppError {
    fn from(err: BearerError) -> Self {
        AppError::with_source(ErrorKind::Authentication, err.to_string(), err)
    }
}

impl From<AuthzError> for AppError {
    fn from(err: AuthzError) -> Self {
        let kind = match err {
            AuthzError::Forbidden { .. } => ErrorKind::Authorization,
            AuthzError::SelfTargetForbidden => ErrorKind::Validation,
            AuthzError::LastAdminProtected => ErrorKind::Conflict,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_mapping() {
        assert_eq!(AppError::from(PolicyError::MissingDigit).status_code(), 400);
        assert_eq!(AppError::from(ValidationError::Expired).status_code(), 401);
        assert_eq!(AppError::from(BearerError::MissingHeader).status_code(), 401);
        assert_eq!(
            AppError::from(AuthzError::Forbidden {
                required: UserRole::Admin
            })
            .status_code(),
            403
        );
        assert_eq!(
            AppError::from(IssuanceError::WeakSecret(InvalidSecretError::DefaultValue))
                .status_code(),
            500
        );
    }

    #[test]
    fn test_policy_message_passes_through() {
        let err = AppError::from(PolicyError::TooShort { min: 10 });
        assert_eq!(err.message, "password must be at least 10 characters long");
    }

    #[test]
    fn test_forbidden_message_names_role() {
        let err = AuthzError::Forbidden {
            required: UserRole::Admin,
        };
        assert_eq!(err.to_string(), "admin access required");
    }
}
