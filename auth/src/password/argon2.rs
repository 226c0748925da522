use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2id work factor.
///
/// Only affects newly produced hashes. Verification always uses the
/// parameters embedded in the stored PHC string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a password hasher with the default work factor.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `params` - Memory, iteration and parallelism costs
    ///
    /// # Errors
    /// * `InvalidParameters` - Costs are outside the ranges Argon2 accepts
    pub fn with_params(params: HashingParams) -> Result<Self, PasswordError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
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
    /// The digest is recomputed with the stored parameters and compared in
    /// constant time. A mismatch is `Ok(false)`, never an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_params(HashingParams {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));

        assert!(!hasher
            .verify("wrong_password", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = cheap_hasher();

        let first = hasher.hash("pw123456").expect("Failed to hash password");
        let second = hasher.hash("pw123456").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("pw123456", &first).unwrap());
        assert!(hasher.verify("pw123456", &second).unwrap());
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("plaintext-secret").unwrap();

        assert!(!hash.contains("plaintext-secret"));
    }

    #[test]
    fn test_hash_embeds_work_factor() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("password").unwrap();

        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hash.contains("m=8,t=1,p=1"));
    }

    #[test]
    fn test_verify_uses_embedded_parameters() {
        let cheap = cheap_hasher();
        let other = PasswordHasher::with_params(HashingParams {
            memory_kib: 16,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();

        let hash = cheap.hash("password").unwrap();

        assert!(other.verify("password", &hash).unwrap());
        assert!(!other.verify("Password", &hash).unwrap());
    }

    #[test]
    fn test_default_params_match_argon2_defaults() {
        let params = HashingParams::default();
        assert_eq!(params.memory_kib, Params::DEFAULT_M_COST);
        assert_eq!(params.iterations, Params::DEFAULT_T_COST);
        assert_eq!(params.parallelism, Params::DEFAULT_P_COST);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = PasswordHasher::with_params(HashingParams {
            memory_kib: 8,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = cheap_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert!(result.is_err());
    }
}
