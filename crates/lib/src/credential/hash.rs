//! Password hashing and verification
//!
//! Uses Argon2id with a fresh random salt per hash. Output is a PHC string,
//! so the salt and cost parameters travel with the hash and verification
//! never needs to know which cost was configured when it was produced.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};
use serde::{Deserialize, Serialize};

use super::errors::CodecError;
use crate::Result;

/// Work factor for Argon2id.
///
/// Higher values make each hash slower to compute, for legitimate logins and
/// brute-force attempts alike. The defaults match the `argon2` crate defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashCost {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes over memory
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashCost {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashCost {
    /// Cheapest cost argon2 accepts. Only for tests.
    #[cfg(any(test, feature = "testing"))]
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn params(&self) -> Result<Params> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None).map_err(|e| {
            CodecError::InvalidCost {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Hash a password with Argon2id at the given cost
///
/// # Arguments
/// * `password` - The password to hash
/// * `cost` - Argon2 work factor
///
/// # Returns
/// The PHC-format hash string, embedding algorithm, cost and salt.
/// Two calls with the same password return different strings.
pub fn compute_hash(password: impl AsRef<str>, cost: &HashCost) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, cost.params()?);

    let password_hash = argon2
        .hash_password(password.as_ref().as_bytes(), &salt)
        .map_err(|e| CodecError::HashingFailed {
            reason: e.to_string(),
        })?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its hash
///
/// The comparison of the recomputed digest is constant time.
///
/// # Arguments
/// * `password` - The password to verify
/// * `password_hash` - The stored password hash (PHC format)
///
/// # Returns
/// `Ok(true)` if the password matches, `Ok(false)` if it does not, and
/// `CodecError::MalformedHash` if the stored hash cannot be parsed.
pub fn check_hash(password: impl AsRef<str>, password_hash: impl AsRef<str>) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(password_hash.as_ref()).map_err(|e| CodecError::MalformedHash {
            reason: e.to_string(),
        })?;

    match Argon2::default().verify_password(password.as_ref().as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CodecError::VerificationFailed {
            reason: e.to_string(),
        }
        .into()),
    }
}
