//! PIN hashing and verification using Argon2id.
//!
//! Student PINs are short numeric secrets, so the hash cost is the only
//! brute-force deterrent this subsystem carries. The output is a PHC
//! string carrying salt and parameters, so verification needs no side
//! channel.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::OsRng;

use crate::error::{CredentialError, Result};

/// Argon2id cost parameters, shared by every stored PIN.
/// Changing them re-prices new hashes only; stored PHC strings keep
/// verifying with the parameters they carry.
const MEMORY_COST_KIB: u32 = 19 * 1024;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

fn hasher() -> Result<Argon2<'static>> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
        .map_err(|e| CredentialError::HashFailed(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a PIN with a fresh random salt.
///
/// Returns the PHC string (`$argon2id$...`). Hashing the same PIN twice
/// yields two different strings; both verify against the original PIN.
///
/// # Errors
///
/// Returns `CredentialError::HashFailed` if the hasher itself fails.
/// The PIN value never appears in the error.
pub fn hash_pin(pin: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher()?
        .hash_password(pin.as_bytes(), &salt)
        .map_err(|e| CredentialError::HashFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a PIN against a stored PHC string.
///
/// Returns `false` for a wrong PIN *and* for a malformed or truncated
/// stored hash — the two cases are indistinguishable to the caller, so a
/// boolean check leaks nothing about hash validity. Digest comparison is
/// constant-time inside the argon2 crate.
pub fn verify_pin(pin: &str, stored: &str) -> bool {
    let parsed = match PasswordHash::new(stored) {
        Ok(hash) => hash,
        Err(_) => return false,
    };

    match hasher() {
        Ok(argon2) => argon2.verify_password(pin.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}
