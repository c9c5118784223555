//! Account entities

use chrono::{DateTime, Utc};
use uuid::Uuid;
use wayfare_auth::{Role, UserProfile};

/// Full `users` row, including the password hash.
///
/// Only the accounts domain sees this type; everything handed to the
/// auth gate or serialized to clients goes through [`UserRecord::profile`].
#[derive(Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Projection without the password hash
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl std::fmt::Debug for UserRecord {
    #[mutants::skip] // Redacting formatter
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Input for creating a user row
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    pub fn into_record(self, id: Uuid, now: DateTime<Utc>) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Canonical form used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
