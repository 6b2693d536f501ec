mod batch;
mod error;
mod keys;
mod serialization;
mod traits;

pub use batch::{BatchOp, WriteBatch};
pub use error::{CacheError, Result};
pub use keys::{hash_field, ttl_seconds, CacheKeySpec};
pub use serialization::{
    deserialize_entities, deserialize_entity, serialize_entities, serialize_entity,
    SerializationError,
};
pub use traits::KeyValueStore;
