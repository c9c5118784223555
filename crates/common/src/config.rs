//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Default credential lifetime: seven days.
pub const DEFAULT_JWT_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Default password-reset code lifetime: fifteen minutes.
pub const DEFAULT_RESET_CODE_TTL_SECONDS: i64 = 15 * 60;

pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Work factors bcrypt accepts.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection URL (PostgreSQL)
    pub database_url: String,

    /// Server-held signing secret for bearer credentials
    pub jwt_secret: String,
    pub jwt_ttl_seconds: i64,

    /// Password reset
    pub reset_code_ttl_seconds: i64,
    pub bcrypt_cost: u32,

    /// Runtime configuration
    pub rust_log: String,
    pub port: u16,
}

impl std::fmt::Debug for Config {
    #[mutants::skip] // Redacting formatter, covered by test_debug_redacts_secrets
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_ttl_seconds", &self.jwt_ttl_seconds)
            .field("reset_code_ttl_seconds", &self.reset_code_ttl_seconds)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("rust_log", &self.rust_log)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_ttl_seconds: parse_var("JWT_TTL_SECONDS", DEFAULT_JWT_TTL_SECONDS)?,

            reset_code_ttl_seconds: parse_var(
                "RESET_CODE_TTL_SECONDS",
                DEFAULT_RESET_CODE_TTL_SECONDS,
            )?,
            bcrypt_cost: parse_var("BCRYPT_COST", DEFAULT_BCRYPT_COST)?,

            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "wayfare=debug".to_string()),
            port: parse_var("PORT", DEFAULT_PORT)?,
        };

        if config.jwt_ttl_seconds <= 0 {
            anyhow::bail!("JWT_TTL_SECONDS must be positive");
        }
        if config.reset_code_ttl_seconds <= 0 {
            anyhow::bail!("RESET_CODE_TTL_SECONDS must be positive");
        }
        if !BCRYPT_COST_RANGE.contains(&config.bcrypt_cost) {
            anyhow::bail!(
                "BCRYPT_COST must be between {} and {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end()
            );
        }

        Ok(config)
    }
}

/// Read an optional variable, falling back to `default` when unset.
/// A set-but-unparseable value is an error rather than a silent default.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{name} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}
