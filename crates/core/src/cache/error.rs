use thiserror::Error;

use super::serialization::SerializationError;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Pipeline failed: {0}")]
    PipelineFailed(String),
}

impl CacheError {
    /// Returns true when the store could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, CacheError::ConnectionFailed(_))
    }
}

impl From<SerializationError> for CacheError {
    fn from(err: SerializationError) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
