use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Identity carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// User identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Avatar reference
    pub avatar: String,
}

impl Identity {
    pub fn new(id: impl ToString, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.into(),
            avatar: avatar.into(),
        }
    }
}

/// Session token payload.
///
/// The identity fields are flattened next to the registered `iat` and `exp`
/// claims, so the encoded payload reads `{id, name, avatar, iat, exp}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: Identity,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an identity valid for `ttl` from `issued_at`.
    ///
    /// # Errors
    /// * `InvalidTtl` - Expiry falls outside the representable time range
    pub fn for_identity(
        identity: Identity,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = expiry(issued_at, ttl)?;

        Ok(Self {
            identity,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid at the exact second stored in `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

pub(crate) fn expiry(issued_at: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, JwtError> {
    issued_at.checked_add_signed(ttl).ok_or_else(|| {
        JwtError::InvalidTtl(format!("{}s past {} is out of range", ttl.num_seconds(), issued_at))
    })
}
