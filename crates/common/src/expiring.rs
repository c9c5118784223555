//! Expiring key-value store for short-lived secrets
//!
//! Password-reset codes live here instead of in a module-level map, so the
//! in-process implementation can be replaced by a shared cache without
//! touching call sites.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

/// Keyed store whose entries disappear after their TTL.
#[async_trait::async_trait]
pub trait ExpiringStore: Send + Sync {
    /// Insert or replace `key`. A non-positive `ttl` stores an already-expired entry.
    async fn put(&self, key: &str, value: String, ttl: Duration);

    /// Current value for `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Option<String>;

    /// Remove `key` and return its value if it was still live.
    async fn take(&self, key: &str) -> Option<String>;

    /// Remove `key` regardless of expiry. Returns whether an entry existed.
    async fn remove(&self, key: &str) -> bool;

    /// Atomically add one to the counter at `key` and return the new value.
    ///
    /// A missing or expired counter restarts at 1 with a fresh `ttl`; a live
    /// one keeps its original deadline. A value that is not a number counts
    /// as 0.
    async fn increment(&self, key: &str, ttl: Duration) -> u32;

    /// Drop every expired entry, returning how many were evicted.
    async fn purge_expired(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Single-process `ExpiringStore` backed by a mutex-guarded map.
///
/// Expired entries are evicted lazily on access and in bulk by
/// [`ExpiringStore::purge_expired`].
#[derive(Debug, Default)]
pub struct InMemoryExpiringStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryExpiringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, live or not yet purged.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a half-written entry,
    // so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl ExpiringStore for InMemoryExpiringStore {
    async fn put(&self, key: &str, value: String, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: Utc::now() + ttl,
        };
        self.lock().insert(key.to_string(), entry);
    }

    async fn get(&self, key: &str) -> Option<String> {
        let now = Utc::now();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    async fn take(&self, key: &str) -> Option<String> {
        let now = Utc::now();
        self.lock()
            .remove(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value)
    }

    async fn remove(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    async fn increment(&self, key: &str, ttl: Duration) -> u32 {
        let now = Utc::now();
        let mut entries = self.lock();
        match entries.get_mut(key) {
            Some(entry) if entry.is_live(now) => {
                let count = entry.value.parse::<u32>().unwrap_or(0).saturating_add(1);
                entry.value = count.to_string();
                count
            }
            _ => {
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: "1".to_string(),
                        expires_at: now + ttl,
                    },
                );
                1
            }
        }
    }

    async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        let evicted = before - entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Purged expired entries");
        }
        evicted
    }
}
