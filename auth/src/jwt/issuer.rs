use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::expiry;
use super::claims::Claims;
use super::claims::Identity;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Scheme tag prepended to tokens when they are handed to clients.
pub const BEARER_PREFIX: &str = "Bearer ";

/// A freshly issued session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    /// Encoded JWT, without scheme tag
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    /// Token in `Authorization` header form (`Bearer <jwt>`).
    pub fn bearer(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.token)
    }
}

/// Issues and validates stateless, time-limited session tokens.
///
/// Nothing is stored server-side: a token with an intact signature is honored
/// until its expiry passes.
pub struct SessionTokenIssuer {
    handler: JwtHandler,
    ttl: Duration,
}

impl SessionTokenIssuer {
    pub const DEFAULT_TTL_SECONDS: i64 = 3600;

    /// Create an issuer signing with `secret` and granting `ttl` of validity.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty
    /// * `InvalidTtl` - `ttl` is negative or pushes expiry out of range
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, JwtError> {
        if ttl < Duration::zero() {
            return Err(JwtError::InvalidTtl(format!(
                "{}s must not be negative",
                ttl.num_seconds()
            )));
        }
        expiry(Utc::now(), ttl)?;

        Ok(Self {
            handler: JwtHandler::new(secret)?,
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `identity`, valid from now for the configured TTL.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    /// * `InvalidTtl` - Expiry falls outside the representable time range
    pub fn issue(&self, identity: &Identity) -> Result<SessionToken, JwtError> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
    ) -> Result<SessionToken, JwtError> {
        let expires_at = expiry(now, self.ttl)?;
        let claims = Claims::for_identity(identity.clone(), now, self.ttl)?;
        let token = self.handler.encode(&claims)?;

        Ok(SessionToken {
            token,
            issued_at: now,
            expires_at,
        })
    }

    /// Validate a token and return the identity it carries.
    ///
    /// Accepts both the bare JWT and the `Bearer <jwt>` form.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature mismatch or malformed token
    /// * `TokenExpired` - Current time is at or past the token's expiry
    pub fn validate(&self, token: &str) -> Result<Identity, JwtError> {
        self.validate_at(token, Utc::now())
    }

    /// Validate a token as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, JwtError> {
        let token = strip_bearer(token);

        // Signature is checked inside decode, before expiry is looked at.
        let claims: Claims = self.handler.decode(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims.identity)
    }
}

fn strip_bearer(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn issuer() -> SessionTokenIssuer {
        SessionTokenIssuer::new(SECRET, Duration::seconds(3600)).unwrap()
    }

    fn identity() -> Identity {
        Identity::new(
            "8b1f4c7e-0c1d-4a4e-9f59-2d7c1f0e6a11",
            "A",
            "https://www.gravatar.com/avatar/abc?s=200&r=pg&d=mm",
        )
    }

    fn flip_signature_char(token: &str) -> String {
        let signature_start = token.rfind('.').unwrap() + 1;
        let mut bytes = token.as_bytes().to_vec();
        let index = signature_start + 4;
        bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let issuer = issuer();

        let token = issuer.issue(&identity()).expect("Failed to issue token");
        assert_eq!(token.expires_at - token.issued_at, Duration::seconds(3600));

        let decoded = issuer.validate(&token.token).expect("Failed to validate");
        assert_eq!(decoded, identity());
    }

    #[test]
    fn test_validate_accepts_bearer_form() {
        let issuer = issuer();
        let token = issuer.issue(&identity()).unwrap();

        assert!(token.bearer().starts_with("Bearer "));
        assert_eq!(issuer.validate(&token.bearer()).unwrap(), identity());
    }

    #[test]
    fn test_validate_after_ttl_is_expired() {
        let issuer = issuer();
        let issued_at = Utc::now();
        let token = issuer.issue_at(&identity(), issued_at).unwrap();

        let just_before = issued_at + Duration::seconds(3599);
        assert!(issuer.validate_at(&token.token, just_before).is_ok());

        let at_expiry = issued_at + Duration::seconds(3600);
        assert_eq!(
            issuer.validate_at(&token.token, at_expiry),
            Err(JwtError::TokenExpired)
        );
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let issuer = SessionTokenIssuer::new(SECRET, Duration::zero()).unwrap();
        let token = issuer.issue(&identity()).unwrap();

        assert_eq!(issuer.validate(&token.token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_flipped_signature_is_invalid() {
        let issuer = issuer();
        let token = issuer.issue(&identity()).unwrap();
        let tampered = flip_signature_char(&token.token);

        assert!(matches!(
            issuer.validate(&tampered),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_flipped_signature_is_invalid_even_when_expired() {
        let issuer = issuer();
        let issued_at = Utc::now();
        let token = issuer.issue_at(&identity(), issued_at).unwrap();
        let tampered = flip_signature_char(&token.token);

        let much_later = issued_at + Duration::days(30);
        assert!(matches!(
            issuer.validate_at(&tampered, much_later),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let other = SessionTokenIssuer::new(
            b"another_secret_key_at_least_32_bytes",
            Duration::seconds(3600),
        )
        .unwrap();
        let token = other.issue(&identity()).unwrap();

        assert!(matches!(
            issuer().validate(&token.token),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            issuer().validate("Bearer not-a-token"),
            Err(JwtError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_negative_ttl_rejected() {
        let result = SessionTokenIssuer::new(SECRET, Duration::seconds(-1));
        assert!(matches!(result, Err(JwtError::InvalidTtl(_))));
    }

    #[test]
    fn test_out_of_range_ttl_rejected() {
        let result = SessionTokenIssuer::new(SECRET, Duration::seconds(1_000_000_000_000_000));
        assert!(matches!(result, Err(JwtError::InvalidTtl(_))));
    }

    #[test]
    fn test_issue_at_far_future_fails_without_panicking() {
        let far_future = DateTime::<Utc>::MAX_UTC - Duration::seconds(10);

        assert!(matches!(
            issuer().issue_at(&identity(), far_future),
            Err(JwtError::InvalidTtl(_))
        ));
    }
}
