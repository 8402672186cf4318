//! JWT claims structure embedded in every session token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pooplet_entity::user::UserRole;

/// Claims payload of a session token.
///
/// Field names are the wire names: `{user_id, email, role, exp, iat}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub user_id: String,
    /// Email of the user at issuance.
    pub email: String,
    /// Role of the user at issuance.
    pub role: UserRole,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Issued-at timestamp (seconds since epoch); 0 if the token carried none.
    #[serde(default)]
    pub iat: i64,
}

impl Claims {
    /// Returns the user ID from the subject claim.
    pub fn subject(&self) -> &str {
        &self.user_id
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Returns the issued-at time as a `DateTime<Utc>`.
    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Checks whether this token has expired at `now`. The boundary is
    /// inclusive: a token is dead at the second it expires.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Returns the remaining TTL in seconds (0 if expired).
    pub fn remaining_ttl_seconds(&self) -> u64 {
        let remaining = self.exp - Utc::now().timestamp();
        if remaining > 0 { remaining as u64 } else { 0 }
    }
}
