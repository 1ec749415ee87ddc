//! Password hashing and verification.
//!
//! Hashes are salted scrypt digests in PHC string form
//! (`$scrypt$ln=..,r=..,p=..$salt$hash`), so the cost parameters and salt
//! travel with the hash and nothing else needs to be stored.

use scrypt::password_hash::rand_core::OsRng;
use scrypt::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use scrypt::{Params, Scrypt};

use crate::AuthError;

/// scrypt's recommended work factor: N = 2^17.
pub const DEFAULT_LOG_N: u8 = 17;

const BLOCK_SIZE: u32 = 8;
const PARALLELISM: u32 = 1;
const OUTPUT_LEN: usize = 32;

/// Hashes a password with a fresh random salt at the recommended cost.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    hash_password_with_cost(plain, DEFAULT_LOG_N)
}

/// Hashes a password with `N = 2^log_n`.
///
/// Lower costs are for tests and constrained hosts only.
pub fn hash_password_with_cost(
    plain: &str,
    log_n: u8,
) -> Result<String, AuthError> {
    let params = Params::new(log_n, BLOCK_SIZE, PARALLELISM, OUTPUT_LEN)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Scrypt
        .hash_password_customized(plain.as_bytes(), None, None, params, &salt)
        .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Checks a password against a stored hash.
///
/// The cost is read back from the hash itself. An unparseable hash
/// verifies nothing.
pub fn verify_password(hash: &str, plain: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Scrypt.verify_password(plain.as_bytes(), &parsed).is_ok()
}
