use std::fmt::Display;
use std::time::Duration;

/// Identifies one cached value and its optional expiry.
///
/// Used both for whole-result keys and for hash keys of the merge cache. A
/// zero TTL is the same as no TTL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKeySpec {
    key: String,
    ttl: Option<Duration>,
}

impl CacheKeySpec {
    /// Creates a spec for `key` without expiry.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ttl: None,
        }
    }

    /// Sets the time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = (!ttl.is_zero()).then_some(ttl);
        self
    }

    /// Sets the time-to-live in whole seconds.
    pub fn with_ttl_secs(self, seconds: u64) -> Self {
        self.with_ttl(Duration::from_secs(seconds))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

/// Renders an identifier as a hash field name.
pub fn hash_field<I: Display + ?Sized>(id: &I) -> String {
    id.to_string()
}

/// Converts a TTL into the whole seconds sent to the store.
///
/// Sub-second durations round up to one second so a TTL never means
/// "expire immediately".
pub fn ttl_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs();
    if ttl.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs.max(1)
    }
}
