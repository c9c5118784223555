//! Bearer token codec and Authorization header parsing

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

use crate::claims::TokenClaims;
use crate::config::{AuthConfig, ConfigError};
use crate::error::AuthError;

/// Clock-skew tolerance applied to `exp`. Zero: a token is rejected the
/// second after its expiry.
pub const EXPIRY_LEEWAY_SECONDS: u64 = 0;

const BEARER_SCHEME: &str = "Bearer";

/// Why a credential failed verification. Server-side only; clients see
/// [`AuthError::Invalid`] for both verification failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed or its signature does not verify")]
    Malformed,

    #[error("token has expired")]
    Expired,

    #[error("token could not be signed")]
    Signing,
}

/// Signs and verifies HS256 bearer credentials with the server secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from validated configuration. An unusable secret is
    /// a startup failure.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = EXPIRY_LEEWAY_SECONDS;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            default_ttl: config.token_ttl,
        })
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a credential for `subject` expiring at `now + ttl`.
    ///
    /// A negative `ttl` yields a credential that is already expired.
    pub fn issue(&self, subject: Uuid, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let exp = now.saturating_add(ttl.num_seconds()).max(0);

        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now.max(0) as u64,
            exp: exp as u64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::Signing
        })
    }

    /// Issue a credential with the configured default lifetime.
    pub fn issue_default(&self, subject: Uuid) -> Result<String, TokenError> {
        self.issue(subject, self.default_ttl)
    }

    /// Verify signature and expiry, returning the subject.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => {
                    tracing::debug!(error = %e, "JWT validation failed");
                    TokenError::Malformed
                }
            })?;

        Uuid::parse_str(&token_data.claims.sub).map_err(|_| {
            tracing::debug!("JWT subject is not a user id");
            TokenError::Malformed
        })
    }
}

/// Extract the bearer credential from a raw Authorization header value.
///
/// Accepts `Bearer <token>` (scheme matched case-insensitively) or a bare
/// token, ignoring surrounding whitespace. A header that is absent, blank,
/// or only the scheme marker is [`AuthError::Missing`]. Bytes that are
/// not UTF-8 count as a present but unusable credential.
pub(crate) fn extract_bearer_token(header: Option<&[u8]>) -> Result<&str, AuthError> {
    let raw = header.ok_or(AuthError::Missing)?;

    let value = std::str::from_utf8(raw)
        .map_err(|_| {
            tracing::warn!("Authorization header is not valid UTF-8");
            AuthError::Invalid
        })?
        .trim();

    let token = match strip_scheme(value) {
        Some(rest) => rest.trim(),
        None => value,
    };

    if token.is_empty() {
        return Err(AuthError::Missing);
    }
    Ok(token)
}

/// Strip a leading `Bearer` scheme. Returns `None` when the value does not
/// start with the scheme as a whole word.
fn strip_scheme(value: &str) -> Option<&str> {
    let scheme = value.get(..BEARER_SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let rest = &value[BEARER_SCHEME.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        Some(_) => None,
    }
}
