//! Redis key-value store implementation.
//!
//! Scalars map to `EXISTS`/`GET`/`SET`/`SETEX`, hash lookups to `HMGET`, and
//! write batches to an atomic pipeline of `HSET` and `EXPIRE`.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use asidecache_core::cache::{ttl_seconds, BatchOp, KeyValueStore, Result, WriteBatch};

use super::error::{map_pipeline_error, map_redis_error};

/// Redis store backend using connection manager for pooling.
#[derive(Clone)]
pub struct RedisStore {
    conn: redis::aio::ConnectionManager,
}

impl RedisStore {
    /// Creates a new Redis store connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        conn.exists(key).await.map_err(map_redis_error)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                conn.set_ex::<_, _, ()>(key, value, ttl_seconds(duration))
                    .await
                    .map_err(map_redis_error)?;
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(map_redis_error)?;
            }
        }

        Ok(())
    }

    async fn hash_multi_get(&self, key: &str, fields: &[String]) -> Result<Vec<Option<Vec<u8>>>> {
        // HMGET needs at least one field.
        if fields.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();
        let values: Vec<Option<Vec<u8>>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;
        Ok(values)
    }

    async fn execute(&self, batch: WriteBatch) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        pipe.atomic();
        for op in batch {
            match op {
                BatchOp::HashSet { key, field, value } => {
                    pipe.cmd("HSET").arg(key).arg(field).arg(value).ignore();
                }
                BatchOp::Expire { key, ttl } => {
                    pipe.cmd("EXPIRE").arg(key).arg(ttl_seconds(ttl)).ignore();
                }
            }
        }

        let mut conn = self.conn.clone();
        let _: () = pipe
            .query_async(&mut conn)
            .await
            .map_err(map_pipeline_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_store() -> Option<RedisStore> {
        RedisStore::new(&redis_url()).await.ok()
    }

    /// Generate a unique test key to avoid conflicts.
    fn test_key(suffix: &str) -> String {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("test:redis_store:{}:{}", nanos, suffix)
    }

    async fn cleanup(store: &RedisStore, key: &str) {
        let mut conn = store.conn.clone();
        conn.del::<_, ()>(key).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("set_get");
        store.set(&key, b"hello world", None).await.unwrap();

        assert!(store.exists(&key).await.unwrap());
        assert_eq!(
            store.get(&key).await.unwrap(),
            Some(b"hello world".to_vec())
        );

        cleanup(&store, &key).await;
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("nonexistent");
        assert!(!store.exists(&key).await.unwrap());
        assert_eq!(store.get(&key).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("ttl");
        store
            .set(&key, b"expiring value", Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(store.exists(&key).await.unwrap());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(!store.exists(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_redis_hash_batch_and_multi_get() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("hash");
        let mut batch = WriteBatch::new();
        batch
            .hash_set(&key, "10", b"hanoi".to_vec())
            .hash_set(&key, "30", b"da nang".to_vec())
            .expire(&key, Duration::from_secs(60));
        store.execute(batch).await.unwrap();

        let fields = vec!["30".to_string(), "20".to_string(), "10".to_string()];
        let values = store.hash_multi_get(&key, &fields).await.unwrap();
        assert_eq!(
            values,
            vec![Some(b"da nang".to_vec()), None, Some(b"hanoi".to_vec())]
        );

        let mut conn = store.conn.clone();
        let ttl: i64 = conn.ttl(&key).await.unwrap();
        assert!(ttl > 0 && ttl <= 60);

        cleanup(&store, &key).await;
    }

    #[tokio::test]
    async fn test_redis_single_field_multi_get() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("single_field");
        let mut batch = WriteBatch::new();
        batch.hash_set(&key, "10", b"hanoi".to_vec());
        store.execute(batch).await.unwrap();

        let values = store
            .hash_multi_get(&key, &["10".to_string()])
            .await
            .unwrap();
        assert_eq!(values, vec![Some(b"hanoi".to_vec())]);

        cleanup(&store, &key).await;
    }

    #[tokio::test]
    async fn test_redis_wrong_type_batch_fails() {
        let Some(store) = get_test_store().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("wrong_type");
        store.set(&key, b"scalar", None).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.hash_set(&key, "1", b"v".to_vec());
        assert!(store.execute(batch).await.is_err());

        cleanup(&store, &key).await;
    }
}
