use chrono::Duration;

use crate::jwt::Identity;
use crate::jwt::JwtError;
use crate::jwt::SessionToken;
use crate::jwt::SessionTokenIssuer;
use crate::password::HashingParams;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Settings shared by the password hasher and the token issuer.
///
/// Built once at startup and handed to [`Authenticator::new`].
#[derive(Clone)]
pub struct AuthSettings {
    pub secret: Vec<u8>,
    pub token_ttl: Duration,
    pub hashing: HashingParams,
}

impl AuthSettings {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: Duration::seconds(SessionTokenIssuer::DEFAULT_TTL_SECONDS),
            hashing: HashingParams::default(),
        }
    }

    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    pub fn with_hashing(mut self, hashing: HashingParams) -> Self {
        self.hashing = hashing;
        self
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("hashing", &self.hashing)
            .finish()
    }
}

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: SessionTokenIssuer,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    pub session: SessionToken,
}

impl AuthenticationResult {
    /// Access token in `Bearer <jwt>` form.
    pub fn access_token(&self) -> String {
        self.session.bearer()
    }
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing parameters are invalid
    /// * `JwtError` - Signing secret is empty or the token lifetime is out of range
    pub fn new(settings: AuthSettings) -> Result<Self, AuthenticationError> {
        Ok(Self {
            password_hasher: PasswordHasher::with_params(settings.hashing)?,
            token_issuer: SessionTokenIssuer::new(&settings.secret, settings.token_ttl)?,
        })
    }

    /// Hash a password for storage.
    ///
    /// CPU-bound; async callers should run it on a blocking pool.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `identity` - Identity to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        identity: &Identity,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let session = self.token_issuer.issue(identity)?;

        Ok(AuthenticationResult { session })
    }

    /// Issue a session token without password verification.
    pub fn issue_token(&self, identity: &Identity) -> Result<SessionToken, JwtError> {
        self.token_issuer.issue(identity)
    }

    /// Validate a session token (bare or `Bearer`-prefixed).
    pub fn validate_token(&self, token: &str) -> Result<Identity, JwtError> {
        self.token_issuer.validate(token)
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_issuer.ttl()
    }
}
