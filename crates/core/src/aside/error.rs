use thiserror::Error;

use crate::cache::CacheError;
use crate::storage::FetchError;

/// Errors returned by the cache-aside operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheAsideError {
    /// The backing store could not answer. Distinct from "not found".
    #[error("Backing store fetch for {key} failed: {source}")]
    BackingStore {
        key: String,
        #[source]
        source: FetchError,
    },
}

impl CacheAsideError {
    pub(crate) fn backing_store(key: &str, source: FetchError) -> Self {
        CacheAsideError::BackingStore {
            key: key.to_string(),
            source,
        }
    }
}

/// Result type for cache-aside operations.
pub type Result<T> = std::result::Result<T, CacheAsideError>;

/// A cache problem that was absorbed during a lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheFault {
    /// Reading from the store failed; the lookup fell back to the backing store.
    #[error("Cache read failed: {0}")]
    Read(CacheError),
    /// A cached value could not be decoded and was treated as a miss.
    #[error("Cached value at {key}{} is corrupt: {error}", field_suffix(.field))]
    Corrupt {
        key: String,
        field: Option<String>,
        error: CacheError,
    },
    /// Writing fetched entities back to the store failed.
    #[error("Cache write failed: {0}")]
    Write(CacheError),
}

fn field_suffix(field: &Option<String>) -> String {
    field.as_ref().map(|f| format!("[{f}]")).unwrap_or_default()
}
