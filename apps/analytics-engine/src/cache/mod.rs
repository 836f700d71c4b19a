//! TTL-keyed memoization for computed analytics.
//!
//! The cache is an abstract capability so in-memory and distributed
//! backings are interchangeable without touching analytics logic. It is a
//! pure optimization: every operation is infallible from the caller's
//! view, and a backing that fails internally must degrade to a miss —
//! recomputation is always correct because results are pure functions of
//! immutable history. For the same reason, concurrent misses on one key
//! may each recompute; there is deliberately no single-flight
//! deduplication, duplicate work only costs CPU.

mod memory;

pub mod keys;

use std::time::{Duration, Instant};

use serde_json::Value;

pub use memory::InMemoryResultCache;

/// A cached whole-value entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Stored JSON value.
    pub value: Value,
    /// Point after which the entry reads as a miss.
    pub expires_at: Instant,
}

/// Capability interface for result memoization.
pub trait ResultCache: Send + Sync {
    /// Look up a live entry.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store a whole value under a key with a time-to-live.
    fn set(&self, key: &str, value: Value, ttl: Duration);

    /// Drop one entry.
    fn delete(&self, key: &str);

    /// Drop every entry whose key starts with the prefix.
    fn invalidate_prefix(&self, prefix: &str);
}
