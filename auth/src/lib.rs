//! Authentication utilities library
//!
//! Provides the authentication core used by the account service:
//! - Password hashing (Argon2id, configurable work factor)
//! - Stateless session tokens (HS256 JWT with expiry)
//! - Authentication coordination
//!
//! The library performs no I/O. Hashing is deliberately slow, so async callers
//! are expected to run it on a blocking thread pool.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::{HashingParams, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_params(HashingParams {
//!     cost: 1,
//!     memory_kib: 1024,
//!     parallelism: 1,
//! })
//! .unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Identity, SessionTokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = SessionTokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1)).unwrap();
//! let identity = Identity::new("user123", "alice", "https://www.gravatar.com/avatar/abc");
//! let token = issuer.issue(&identity).unwrap();
//! assert_eq!(issuer.validate(&token.bearer()).unwrap(), identity);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthSettings;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::Identity;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionToken;
pub use jwt::SessionTokenIssuer;
pub use jwt::BEARER_PREFIX;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
