//! Password digests.
//!
//! Stored credentials are unsalted SHA-256 hex digests. The collection
//! already holds digests in this form, so the transformation here must stay
//! fixed; changing it (salting, another algorithm) would lock out every
//! student who has already completed setup.

use sha2::{Digest, Sha256};

/// Computes the lowercase hex SHA-256 digest of `input`.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher: Sha256 = Digest::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares a plaintext password against a stored digest.
pub fn matches(password: &str, stored_hash: &str) -> bool {
    sha256_hex(password) == stored_hash
}
