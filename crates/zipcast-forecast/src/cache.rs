//! In-memory, time-bounded cache of current readings keyed by postal code.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use crate::types::CurrentReading;

/// Default validity window for a cached reading.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);

/// A stored reading and the time it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub key: String,
    pub value: CurrentReading,
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        // A clock that went backwards yields a negative age; treat that as fresh.
        match now.signed_duration_since(self.stored_at).to_std() {
            Ok(age) => age >= ttl,
            Err(_) => false,
        }
    }
}

/// Process-lifetime forecast cache.
///
/// Every operation takes the lock exactly once, so readers never observe a
/// partially written entry. There is no capacity bound; expired entries are
/// dropped by the lookup that finds them.
#[derive(Debug)]
pub struct ForecastCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ForecastCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.get_at(key, Utc::now())
    }

    /// Look up `key` as of `now`.
    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<CacheEntry> {
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            None => {
                tracing::debug!(key, "Forecast cache miss");
                return None;
            }
            Some(entry) => entry.is_expired(now, self.ttl),
        };

        if expired {
            tracing::debug!(key, "Forecast cache entry expired");
            entries.remove(key);
            return None;
        }

        tracing::debug!(key, "Forecast cache hit");
        entries.get(key).cloned()
    }

    pub fn put(&self, key: &str, value: CurrentReading) {
        self.put_at(key, value, Utc::now());
    }

    /// Store `value` under `key`, replacing any prior entry and its timestamp.
    pub fn put_at(&self, key: &str, value: CurrentReading, now: DateTime<Utc>) {
        let entry = CacheEntry {
            key: key.to_string(),
            value,
            stored_at: now,
        };
        self.entries.lock().insert(key.to_string(), entry);
        tracing::debug!(key, "Forecast cached");
    }

    /// Remove `key`. Returns whether an entry (fresh or not) was present.
    pub fn invalidate(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet collected.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ForecastCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
