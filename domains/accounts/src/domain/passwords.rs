//! Password hashing on the blocking pool

use wayfare_common::{crypto, Error, Result};

pub async fn hash(password: String, cost: u32) -> Result<String> {
    tokio::task::spawn_blocking(move || crypto::hash_password(&password, cost))
        .await
        .map_err(|e| Error::Internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| Error::Internal(format!("password hashing failed: {e}")))
}

pub async fn verify(password: String, password_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || crypto::verify_password(&password, &password_hash))
        .await
        .map_err(|e| Error::Internal(format!("password verification task failed: {e}")))
}

/// Stand-in for [`verify`] when no account matched. Does the same bcrypt
/// work at `cost` and always answers `false`, so response time does not
/// reveal whether the email is registered.
pub async fn verify_without_account(password: String, cost: u32) -> Result<bool> {
    hash(password, cost).await.map(|_| false)
}
