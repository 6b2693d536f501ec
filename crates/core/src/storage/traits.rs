use async_trait::async_trait;

use super::{QueryResult, Result};

/// Executes one parameterized read against the authoritative store.
///
/// The cache-aside layer never inspects or builds the query; it only passes
/// the request object through and consumes the rows.
#[async_trait]
pub trait BackingStoreFetcher: Send + Sync {
    /// The request object for one call site (filters, identifiers).
    type Params: Send + Sync;
    /// The raw row shape returned by the store.
    type Row: Send;

    /// Runs the read.
    async fn fetch(&self, params: &Self::Params) -> Result<QueryResult<Self::Row>>;
}
