//! The two cache-aside access patterns.
//!
//! Both operations share one failure policy:
//!
//! - Cache problems (unreachable store, undecodable values, failed writes) are
//!   absorbed, logged and reported as [`CacheFault`]s on the returned
//!   [`Lookup`]. They never fail the read.
//! - Backing store failures are returned as [`CacheAsideError`] and are never
//!   turned into "not found".
//!
//! Neither operation coalesces concurrent identical requests. Two callers
//! missing the same key both hit the backing store, and the last write wins.

mod error;
mod lookup;
mod merge;
mod single;
mod transform;

#[cfg(test)]
mod mock;

pub use error::{CacheAsideError, CacheFault, Result};
pub use lookup::{Lookup, Source};
pub use merge::fetch_merged;
pub use single::fetch_cached;
pub use transform::Identifiable;
