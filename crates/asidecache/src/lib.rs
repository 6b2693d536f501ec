//! Cache-aside category lookups over SQLite.
//!
//! Wires the generic operations from `asidecache_core::aside` to concrete
//! collaborators: an in-memory or Redis key-value store and a SQLite
//! backing store.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod models;
pub mod storage;
