//! Password hashing and verification
//!
//! Digests are salted argon2 strings produced by `password-auth`, so the
//! same plaintext hashes differently on every call and verification is
//! deliberately expensive.

/// Hash a plaintext password. The salt is embedded in the returned digest.
pub fn hash_password(password: &str) -> String {
    password_auth::generate_hash(password)
}

/// Verify a plaintext password against a stored digest.
///
/// Never fails hard: a malformed or truncated digest verifies as a
/// non-match rather than an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    password_auth::verify_password(password, hash).is_ok()
}
