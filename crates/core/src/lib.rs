//! Cache-aside data access core.
//!
//! Mediates between application queries and an authoritative backing store
//! through a key-value cache. Two access patterns are provided:
//!
//! - [`aside::fetch_cached`]: a whole result set cached under one key.
//! - [`aside::fetch_merged`]: a list of identifiers resolved against one hash
//!   key, with misses filled from the backing store and backfilled in a batch.
//!
//! Cache failures never fail a read. Backing store failures always do.

pub mod aside;
pub mod cache;
pub mod storage;
