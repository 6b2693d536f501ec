use thiserror::Error;

/// Errors raised by a backing store fetch.
///
/// These always reach the caller. "No rows" is not an error; it is an empty
/// [`QueryResult`](super::QueryResult).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for backing store fetches.
pub type Result<T> = std::result::Result<T, FetchError>;
