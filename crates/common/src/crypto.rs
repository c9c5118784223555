//! Hashing utilities shared across Wayfare crates
//!
//! Passwords use bcrypt. Short-lived secrets (password-reset codes) use
//! SHA-256 with a random salt and constant-time comparison, which is
//! enough for values that expire within minutes.

use rand::RngCore;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

/// Hash a short-lived secret. Output format is `hex(salt):hex(sha256(secret || salt))`.
pub fn hash_secret(secret: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let digest = salted_digest(secret, &salt);
    format!("{}:{}", hex::encode(salt), hex::encode(digest))
}

/// Verify a secret against a stored hash using constant-time comparison.
///
/// The stored hash format is `hex(salt):hex(sha256(secret || salt))`.
pub fn verify_secret_hash(candidate: &str, stored_hash: &str) -> bool {
    let Some((salt_hex, hash_hex)) = stored_hash.split_once(':') else {
        return false;
    };

    let salt = match hex::decode(salt_hex) {
        Ok(salt) => salt,
        Err(_) => return false,
    };

    let hash = match hex::decode(hash_hex) {
        Ok(hash) => hash,
        Err(_) => return false,
    };

    let candidate_hash = salted_digest(candidate, &salt);

    if hash.len() != candidate_hash.len() {
        return false;
    }

    let mut result = 0u8;
    for (a, b) in hash.iter().zip(candidate_hash.iter()) {
        result |= a ^ b;
    }
    result == 0
}

fn salted_digest(secret: &str, salt: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(salt);
    hasher.finalize().to_vec()
}

/// Hash a password with bcrypt. CPU-bound: call from a blocking context.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Verify a password against a bcrypt hash. A malformed stored hash
/// verifies as `false` rather than erroring.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match bcrypt::verify(password, stored_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            false
        }
    }
}
