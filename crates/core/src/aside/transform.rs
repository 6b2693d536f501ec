//! Entity transform plumbing.
//!
//! Entities are built by caller-supplied functions: one from a raw backing
//! store row, one from a decoded cache value. The cache layer never looks
//! inside an entity except through [`Identifiable`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{deserialize_entity, serialize_entity, SerializationError};

/// Exposes the identifier an entity is cached under in a hash merge cache.
pub trait Identifiable {
    /// The identifier as a hash field name, or `None` when the entity has no
    /// identifier. Entities without one are returned but never cached.
    fn identifier(&self) -> Option<String>;
}

/// Decodes one cached hash field and maps it into an entity.
pub(crate) fn decode_cached<C, E, FC>(
    bytes: &[u8],
    from_cache: &FC,
) -> Result<E, SerializationError>
where
    C: DeserializeOwned,
    FC: Fn(C) -> E,
{
    deserialize_entity::<C>(bytes).map(from_cache)
}

/// Maps raw backing store rows into entities.
pub(crate) fn rows_into_entities<R, E, FR>(rows: Vec<R>, from_row: FR) -> Vec<E>
where
    FR: Fn(R) -> E,
{
    rows.into_iter().map(from_row).collect()
}

/// Serializes an entity for its hash field, if it has an identifier.
pub(crate) fn encode_for_field<E>(entity: &E) -> Option<(String, Result<Vec<u8>, SerializationError>)>
where
    E: Serialize + Identifiable,
{
    entity
        .identifier()
        .map(|field| (field, serialize_entity(entity)))
}
