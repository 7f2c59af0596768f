use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PhcError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Work factor for newly created hashes.
///
/// `cost` is the Argon2 iteration count. Existing hashes keep the parameters
/// they were created with, so these values can be raised without invalidating
/// stored credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    pub cost: u32,
    pub memory_kib: u32,
    pub parallelism: u32,
}

impl HashingParams {
    pub const DEFAULT_COST: u32 = 10;
    pub const DEFAULT_MEMORY_KIB: u32 = 4096;
    pub const DEFAULT_PARALLELISM: u32 = 1;
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
            memory_kib: Self::DEFAULT_MEMORY_KIB,
            parallelism: Self::DEFAULT_PARALLELISM,
        }
    }
}

/// Password hashing implementation.
///
/// Produces salted Argon2id hashes in PHC string format and verifies
/// plaintext passwords against them.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a password hasher with explicit parameters.
    ///
    /// # Arguments
    /// * `params` - Work factor applied to new hashes
    ///
    /// # Errors
    /// * `InvalidParameters` - Argon2 rejected the parameter combination
    pub fn with_params(params: HashingParams) -> Result<Self, PasswordError> {
        let params = Params::new(params.memory_kib, params.cost, params.parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated for every call.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The parameters and salt embedded in `hash` are used, not the ones this
    /// hasher was configured with.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash cannot be parsed or uses unsupported parameters
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::MalformedHash(format!("Invalid password hash: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PhcError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}
