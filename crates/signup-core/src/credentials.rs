//! Credential hashing.
//!
//! Passwords are stored only as Argon2id PHC strings. The hasher is kept
//! separate from the store layer so no record ever sees a cleartext
//! password.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{Result, SignupError};

/// Argon2id cost parameters.
///
/// - Memory: 19 MiB (19 * 1024 KiB)
/// - Iterations: 2
/// - Parallelism: 1
const ARGON2_MEMORY_KB: u32 = 19 * 1024;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;

/// Hashes and verifies passwords with Argon2id.
#[derive(Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Hasher with the default cost parameters.
    pub fn new() -> Result<Self> {
        Self::with_params(ARGON2_MEMORY_KB, ARGON2_ITERATIONS, ARGON2_PARALLELISM)
    }

    /// Hasher with explicit cost parameters.
    pub fn with_params(memory_kb: u32, iterations: u32, parallelism: u32) -> Result<Self> {
        let params = Params::new(memory_kb, iterations, parallelism, None)
            .map_err(|e| SignupError::Credential(format!("Invalid Argon2 params: {}", e)))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password into a PHC string with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| SignupError::Credential(format!("Password hashing failed: {}", e)))
    }

    /// Check a password against a stored PHC string.
    ///
    /// Parameters are read from the PHC string itself, so hashes produced
    /// with other cost settings still verify.
    pub fn verify(&self, password: &str, phc: &str) -> Result<bool> {
        let parsed = PasswordHash::new(phc)
            .map_err(|e| SignupError::Credential(format!("Invalid password hash: {}", e)))?;
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl std::fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("memory_kb", &self.params.m_cost())
            .field("iterations", &self.params.t_cost())
            .field("parallelism", &self.params.p_cost())
            .finish()
    }
}
