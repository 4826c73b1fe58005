use log::warn;

use crate::errors::AuthError;

/// Hashes a password with bcrypt at the given cost. The salt is generated by bcrypt and embedded in the result.
///
/// bcrypt is CPU-bound. Call it from a blocking thread (`web::block`), never directly on a worker.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::CouldNotHashPassword(e.to_string()))
}

/// Checks `password` against a hash produced by [`hash_password`]. Malformed hashes never match.
pub fn verify_password(password: &str, credential_hash: &str) -> bool {
    bcrypt::verify(password, credential_hash).unwrap_or_else(|e| {
        warn!("🔐️ Stored credential could not be checked. {e}");
        false
    })
}
