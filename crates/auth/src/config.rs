//! Authentication configuration

use chrono::Duration;

/// Minimum signing-secret length accepted for HS256.
pub const MIN_SECRET_LEN: usize = 32;

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of credentials issued at signup/login
    pub token_ttl: Duration,
}

/// Fatal startup conditions. Never produced per request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("JWT secret must be at least {MIN_SECRET_LEN} bytes (got {0})")]
    WeakSecret(usize),

    #[error("token TTL must be positive")]
    NonPositiveTtl,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let len = self.jwt_secret.trim().len();
        if len == 0 {
            return Err(ConfigError::MissingSecret);
        }
        if len < MIN_SECRET_LEN {
            return Err(ConfigError::WeakSecret(len));
        }
        if self.token_ttl <= Duration::zero() {
            return Err(ConfigError::NonPositiveTtl);
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    #[mutants::skip] // Redacting formatter
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
