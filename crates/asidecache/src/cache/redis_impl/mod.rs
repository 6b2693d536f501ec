//! Redis store backend.
//!
//! Provides a distributed key-value store for multi-instance deployments.
//! Writes batched by the merge cache run as one `MULTI`/`EXEC` transaction.

mod error;
mod store;

pub use store::RedisStore;
