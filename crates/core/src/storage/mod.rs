mod error;
mod traits;
mod types;

pub use error::{FetchError, Result};
pub use traits::BackingStoreFetcher;
pub use types::QueryResult;
