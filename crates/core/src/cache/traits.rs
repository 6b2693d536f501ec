use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{Result, WriteBatch};

/// Handle to the key-value store sitting in front of the backing store.
///
/// Every operation may fail with [`CacheError::ConnectionFailed`]; callers in
/// this crate absorb those failures instead of failing the read.
///
/// [`CacheError::ConnectionFailed`]: super::CacheError::ConnectionFailed
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns true if `key` holds a live value.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Gets a scalar value by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a scalar value with an optional TTL. Without a TTL any previous
    /// expiry is cleared.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    /// Gets several fields of a hash key. Returns one slot per requested
    /// field, in request order.
    async fn hash_multi_get(&self, key: &str, fields: &[String]) -> Result<Vec<Option<Vec<u8>>>>;

    /// Executes a batch of writes atomically.
    async fn execute(&self, batch: WriteBatch) -> Result<()>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        (**self).set(key, value, ttl).await
    }

    async fn hash_multi_get(&self, key: &str, fields: &[String]) -> Result<Vec<Option<Vec<u8>>>> {
        (**self).hash_multi_get(key, fields).await
    }

    async fn execute(&self, batch: WriteBatch) -> Result<()> {
        (**self).execute(batch).await
    }
}
