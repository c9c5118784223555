//! Shared utilities, configuration, and error handling for Wayfare
//!
//! This crate provides common functionality used across the Wayfare backend:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Password and reset-code hashing
//! - An expiring key-value store for short-lived secrets

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod expiring;
pub mod extractors;

pub use config::Config;
pub use crypto::{hash_password, hash_secret, verify_password, verify_secret_hash};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use expiring::{ExpiringStore, InMemoryExpiringStore};
pub use extractors::{ApiPath, ValidatedJson};
