//! Test doubles shared by the cache-aside tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cache::{BatchOp, CacheError, KeyValueStore, Result as CacheResult, WriteBatch};
use crate::storage::{BackingStoreFetcher, FetchError, QueryResult, Result as FetchResult};

use super::Identifiable;

/// In-memory store with failure switches and write bookkeeping.
#[derive(Default)]
pub struct MockStore {
    scalars: Mutex<HashMap<String, Vec<u8>>>,
    hashes: Mutex<HashMap<String, HashMap<String, Vec<u8>>>>,
    ttls: Mutex<HashMap<String, Duration>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    pub set_calls: AtomicUsize,
    pub batches: Mutex<Vec<WriteBatch>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn seed(&self, key: &str, value: &[u8]) {
        self.scalars
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
    }

    pub fn seed_field(&self, key: &str, field: &str, value: &[u8]) {
        self.hashes
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_vec());
    }

    pub fn scalar(&self, key: &str) -> Option<Vec<u8>> {
        self.scalars.lock().unwrap().get(key).cloned()
    }

    pub fn field(&self, key: &str, field: &str) -> Option<Vec<u8>> {
        self.hashes
            .lock()
            .unwrap()
            .get(key)
            .and_then(|h| h.get(field).cloned())
    }

    pub fn fields(&self, key: &str) -> Vec<String> {
        let mut fields: Vec<String> = self
            .hashes
            .lock()
            .unwrap()
            .get(key)
            .map(|h| h.keys().cloned().collect())
            .unwrap_or_default();
        fields.sort();
        fields
    }

    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.ttls.lock().unwrap().get(key).copied()
    }

    /// Simulates the TTL of `key` running out.
    pub fn expire_now(&self, key: &str) {
        self.scalars.lock().unwrap().remove(key);
        self.hashes.lock().unwrap().remove(key);
        self.ttls.lock().unwrap().remove(key);
    }

    fn check_reads(&self) -> CacheResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MockStore {
    async fn exists(&self, key: &str) -> CacheResult<bool> {
        self.check_reads()?;
        Ok(self.scalars.lock().unwrap().contains_key(key)
            || self.hashes.lock().unwrap().contains_key(key))
    }

    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.check_reads()?;
        Ok(self.scalar(key))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("connection reset".to_string()));
        }
        self.seed(key, value);
        let mut ttls = self.ttls.lock().unwrap();
        match ttl {
            Some(ttl) => ttls.insert(key.to_string(), ttl),
            None => ttls.remove(key),
        };
        Ok(())
    }

    async fn hash_multi_get(
        &self,
        key: &str,
        fields: &[String],
    ) -> CacheResult<Vec<Option<Vec<u8>>>> {
        self.check_reads()?;
        Ok(fields.iter().map(|f| self.field(key, f)).collect())
    }

    async fn execute(&self, batch: WriteBatch) -> CacheResult<()> {
        self.batches.lock().unwrap().push(batch.clone());
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CacheError::PipelineFailed("EXECABORT".to_string()));
        }
        for op in batch {
            match op {
                BatchOp::HashSet { key, field, value } => self.seed_field(&key, &field, &value),
                // EXPIRE on a missing key is a no-op.
                BatchOp::Expire { key, ttl } => {
                    if self.hashes.lock().unwrap().contains_key(&key)
                        || self.scalars.lock().unwrap().contains_key(&key)
                    {
                        self.ttls.lock().unwrap().insert(key, ttl);
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Option<u32>,
    pub name: String,
}

impl Identifiable for Place {
    fn identifier(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct PlaceRow {
    pub place_id: Option<u32>,
    pub place_name: String,
}

pub fn row(id: u32, name: &str) -> PlaceRow {
    PlaceRow {
        place_id: Some(id),
        place_name: name.to_string(),
    }
}

pub fn place(id: u32, name: &str) -> Place {
    Place {
        id: Some(id),
        name: name.to_string(),
    }
}

pub fn place_from_row(row: PlaceRow) -> Place {
    Place {
        id: row.place_id,
        name: row.place_name,
    }
}

/// Returns every row it holds, recording the request objects it receives.
#[derive(Default)]
pub struct ListFetcher {
    rows: Vec<PlaceRow>,
    fail: AtomicBool,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<String>>,
}

impl ListFetcher {
    pub fn with_rows(rows: Vec<PlaceRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        let fetcher = Self::default();
        fetcher.fail.store(true, Ordering::SeqCst);
        fetcher
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BackingStoreFetcher for ListFetcher {
    type Params = String;
    type Row = PlaceRow;

    async fn fetch(&self, params: &String) -> FetchResult<QueryResult<PlaceRow>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(params.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(FetchError::ConnectionFailed("database is down".to_string()));
        }
        Ok(QueryResult::new(self.rows.clone()))
    }
}

/// Returns the rows whose id was requested. Rows without an id are always
/// returned.
#[derive(Default)]
pub struct IdFetcher {
    rows: Vec<PlaceRow>,
    fail: AtomicBool,
    pub requests: Mutex<Vec<Vec<u32>>>,
}

impl IdFetcher {
    pub fn with_rows(rows: Vec<PlaceRow>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        let fetcher = Self::default();
        fetcher.fail.store(true, Ordering::SeqCst);
        fetcher
    }

    pub fn requests(&self) -> Vec<Vec<u32>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl BackingStoreFetcher for IdFetcher {
    type Params = Vec<u32>;
    type Row = PlaceRow;

    async fn fetch(&self, ids: &Vec<u32>) -> FetchResult<QueryResult<PlaceRow>> {
        self.requests.lock().unwrap().push(ids.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(FetchError::QueryFailed("statement timeout".to_string()));
        }
        let rows = self
            .rows
            .iter()
            .filter(|r| r.place_id.is_none_or(|id| ids.contains(&id)))
            .cloned()
            .collect();
        Ok(QueryResult::new(rows))
    }
}
