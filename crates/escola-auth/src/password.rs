use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};

use crate::error::AuthError;

/// Fails instead of hashing a password longer than bcrypt's 72-byte input.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    Ok(non_truncating_hash(password, cost)?)
}

/// `Ok(false)` on mismatch, including passwords too long to have been hashed;
/// `Err` only when `hashed` is not a bcrypt hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AuthError> {
    match non_truncating_verify(password, hashed) {
        Err(BcryptError::Truncation(_)) => Ok(false),
        result => Ok(result?),
    }
}
