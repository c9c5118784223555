//! Password-reset codes

use rand::Rng;

/// Wrong guesses allowed before an outstanding code is discarded.
pub const MAX_RESET_ATTEMPTS: u32 = 5;

/// Six-digit numeric code, zero-padded.
pub fn generate_reset_code() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

/// Expiring-store key holding the hashed code for `email`
pub fn code_key(email: &str) -> String {
    format!("password-reset:code:{email}")
}

/// Expiring-store key counting failed attempts for `email`
pub fn attempts_key(email: &str) -> String {
    format!("password-reset:attempts:{email}")
}
