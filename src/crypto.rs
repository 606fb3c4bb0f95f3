//! Token generation and at-rest hashing
//!
//! Reset tokens are high-entropy random secrets. They are stored as SHA-256
//! hashes so a leaked store never reveals a usable token, and lookups stay
//! simple key lookups over the hash. SHA-256 (rather than a work-factor
//! hash) is sufficient here: 256 bits of randomness cannot be brute forced.

use rand::{TryRngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

/// Generate a 256-bit random token, URL-safe base64 encoded (43 characters).
///
/// # Panics
///
/// Panics if the OS entropy source is unavailable; there is no safe way to
/// continue issuing secrets without it.
pub fn generate_secure_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .expect("OS RNG failure - system entropy source unavailable");
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}

/// Hash a token for storage, hex encoded.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
