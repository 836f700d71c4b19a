//! In-memory TTL cache backing.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use serde_json::Value;

use super::{CacheEntry, ResultCache};

/// Process-local result cache over a guarded hash map.
///
/// Mutation is whole-entry insert/delete only, so a plain `RwLock` map is
/// sufficient; there is no partial-update locking. Expired entries read as
/// misses and are pruned on access.
#[derive(Debug, Default)]
pub struct InMemoryResultCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryResultCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (possibly expired, not yet pruned) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultCache for InMemoryResultCache {
    fn get(&self, key: &str) -> Option<Value> {
        // A poisoned lock degrades to a miss: the cache must never fail a
        // request that recomputation can serve.
        let expired = {
            let map = self.entries.read().ok()?;
            let entry = map.get(key)?;
            if entry.expires_at > Instant::now() {
                return Some(entry.value.clone());
            }
            true
        };

        if expired {
            if let Ok(mut map) = self.entries.write() {
                map.remove(key);
            }
        }
        None
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        if let Ok(mut map) = self.entries.write() {
            map.insert(
                key.to_string(),
                CacheEntry {
                    value,
                    expires_at: Instant::now() + ttl,
                },
            );
        }
    }

    fn delete(&self, key: &str) {
        if let Ok(mut map) = self.entries.write() {
            map.remove(key);
        }
    }

    fn invalidate_prefix(&self, prefix: &str) {
        if let Ok(mut map) = self.entries.write() {
            map.retain(|key, _| !key.starts_with(prefix));
        }
    }
}
