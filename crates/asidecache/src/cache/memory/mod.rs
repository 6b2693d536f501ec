//! In-memory store backend.
//!
//! Provides a thread-safe in-process key-value store with TTLs, hashes and
//! atomic batches for single-instance deployments and tests.

mod store;

pub use store::MemoryStore;
