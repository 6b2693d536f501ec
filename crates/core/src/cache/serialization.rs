//! Pure functions for serializing/deserializing cached values.
//!
//! Values are stored as JSON, which keeps cache contents human-readable and
//! easy to inspect from `redis-cli`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a single entity to JSON bytes.
pub fn serialize_entity<T: Serialize + ?Sized>(entity: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(entity).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a single entity.
pub fn deserialize_entity<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a sequence of entities to a JSON array.
pub fn serialize_entities<T: Serialize>(entities: &[T]) -> Result<Vec<u8>> {
    serde_json::to_vec(entities).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes a JSON array to a vector of entities.
///
/// Anything other than an array of `T` (including a JSON `null`) is an error.
pub fn deserialize_entities<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
