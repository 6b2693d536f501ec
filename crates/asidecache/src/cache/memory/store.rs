//! In-memory key-value store with LRU eviction.
//!
//! Mirrors the subset of Redis semantics the cache-aside layer relies on:
//! - `SET` without a TTL clears any previous expiry
//! - `HSET` on an existing hash keeps its expiry
//! - `EXPIRE` applies to the whole key and is a no-op on missing keys
//! - hash operations on scalar keys (and the reverse) fail with WRONGTYPE
//!
//! Expiry is lazy: expired entries are dropped when they are next touched.
//! Time comes from `tokio::time` so tests can run with a paused clock.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;
use tokio::time::Instant;

use asidecache_core::cache::{BatchOp, CacheError, KeyValueStore, Result, WriteBatch};

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

#[derive(Debug, Clone)]
enum Value {
    Scalar(Vec<u8>),
    Hash(HashMap<String, Vec<u8>>),
}

/// A single store entry with optional expiration.
#[derive(Debug, Clone)]
struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(value: Value, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() >= exp)
    }
}

/// Returns the live entry for `key`, dropping it first if it has expired.
fn live<'a>(store: &'a mut LruCache<String, Entry>, key: &str) -> Option<&'a mut Entry> {
    if store.peek(key).is_some_and(Entry::is_expired) {
        store.pop(key);
    }
    store.get_mut(key)
}

/// In-memory store implementation with LRU eviction.
///
/// Thread-safe store using `Arc<RwLock<LruCache>>` for concurrent access.
/// Cloning is cheap and clones share the same data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    store: Arc<RwLock<LruCache<String, Entry>>>,
}

impl MemoryStore {
    /// Creates a new in-memory store with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of keys before LRU eviction kicks in.
    ///   A hash key counts as one entry regardless of its field count.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Remaining time-to-live of `key`. `None` if the key is missing or has
    /// no expiry.
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let mut store = self.store.write().await;
        live(&mut store, key)
            .and_then(|entry| entry.expires_at)
            .map(|exp| exp.saturating_duration_since(Instant::now()))
    }

    /// Number of stored keys, including ones that expired but were not yet
    /// touched.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut store = self.store.write().await;
        Ok(live(&mut store, key).is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut store = self.store.write().await;
        match live(&mut store, key) {
            Some(Entry {
                value: Value::Scalar(bytes),
                ..
            }) => Ok(Some(bytes.clone())),
            Some(_) => Err(CacheError::OperationFailed(WRONG_TYPE.to_string())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(
            key.to_string(),
            Entry::new(Value::Scalar(value.to_vec()), ttl),
        );
        Ok(())
    }

    async fn hash_multi_get(&self, key: &str, fields: &[String]) -> Result<Vec<Option<Vec<u8>>>> {
        let mut store = self.store.write().await;
        match live(&mut store, key) {
            Some(Entry {
                value: Value::Hash(hash),
                ..
            }) => Ok(fields.iter().map(|f| hash.get(f).cloned()).collect()),
            Some(_) => Err(CacheError::OperationFailed(WRONG_TYPE.to_string())),
            None => Ok(vec![None; fields.len()]),
        }
    }

    async fn execute(&self, batch: WriteBatch) -> Result<()> {
        let mut store = self.store.write().await;

        // Validate up front so a rejected batch leaves nothing behind.
        for op in batch.ops() {
            if let BatchOp::HashSet { key, .. } = op {
                if let Some(Entry {
                    value: Value::Scalar(_),
                    ..
                }) = live(&mut store, key)
                {
                    return Err(CacheError::PipelineFailed(format!("{WRONG_TYPE} ({key})")));
                }
            }
        }

        for op in batch {
            match op {
                BatchOp::HashSet { key, field, value } => match live(&mut store, &key) {
                    Some(Entry {
                        value: Value::Hash(hash),
                        ..
                    }) => {
                        hash.insert(field, value);
                    }
                    Some(_) => unreachable!("scalar keys are rejected before applying"),
                    None => {
                        let hash = HashMap::from([(field, value)]);
                        store.put(key, Entry::new(Value::Hash(hash), None));
                    }
                },
                BatchOp::Expire { key, ttl } => {
                    if ttl.is_zero() {
                        store.pop(&key);
                    } else if let Some(entry) = live(&mut store, &key) {
                        entry.expires_at = Some(Instant::now() + ttl);
                    }
                }
            }
        }

        Ok(())
    }
}
