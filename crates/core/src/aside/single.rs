//! Whole-result cache-aside under a single key.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{deserialize_entities, serialize_entities, CacheKeySpec, KeyValueStore};
use crate::storage::BackingStoreFetcher;

use super::transform::rows_into_entities;
use super::{CacheAsideError, CacheFault, Lookup, Result, Source};

/// Serves a whole query result from `spec.key()`, falling back to `fetcher`.
///
/// - A clean hit returns the cached sequence (possibly empty) and never calls
///   the fetcher.
/// - On a miss the fetcher runs with `params`. Zero rows yield a not-found
///   [`Lookup`] and nothing is cached.
/// - Fetched rows are mapped with `from_row` and written back under the key,
///   with the spec's TTL when it has one. The write-back is skipped when the
///   cache read itself failed, and a failed write-back is only reported as a
///   fault.
///
/// # Errors
///
/// Returns [`CacheAsideError::BackingStore`] when the fetcher fails.
pub async fn fetch_cached<S, F, E, FR>(
    store: &S,
    spec: &CacheKeySpec,
    fetcher: &F,
    params: &F::Params,
    from_row: FR,
) -> Result<Lookup<E>>
where
    S: KeyValueStore + ?Sized,
    F: BackingStoreFetcher + ?Sized,
    E: Serialize + DeserializeOwned,
    FR: Fn(F::Row) -> E,
{
    let key = spec.key();
    let mut faults = Vec::new();

    match read_cached::<S, E>(store, key).await {
        Ok(Some(entities)) => {
            tracing::trace!(key, count = entities.len(), "Cache hit");
            return Ok(Lookup::new(Some(entities), Source::Cache, faults));
        }
        Ok(None) => tracing::trace!(key, "Cache miss"),
        Err(fault) => {
            tracing::warn!(key, error = %fault, "Cache read failed, falling back to backing store");
            faults.push(fault);
        }
    }

    let result = fetcher
        .fetch(params)
        .await
        .map_err(|err| CacheAsideError::backing_store(key, err))?;

    if result.is_empty() {
        tracing::trace!(key, "Backing store returned no rows");
        return Ok(Lookup::not_found(faults));
    }

    let entities = rows_into_entities(result.rows, from_row);

    if faults.is_empty() {
        if let Err(fault) = write_back(store, spec, &entities).await {
            tracing::warn!(key, error = %fault, "Failed to cache fetched result");
            faults.push(fault);
        }
    } else {
        tracing::debug!(key, "Skipping write-back after cache read failure");
    }

    Ok(Lookup::new(Some(entities), Source::BackingStore, faults))
}

async fn read_cached<S, E>(store: &S, key: &str) -> std::result::Result<Option<Vec<E>>, CacheFault>
where
    S: KeyValueStore + ?Sized,
    E: DeserializeOwned,
{
    if !store.exists(key).await.map_err(CacheFault::Read)? {
        return Ok(None);
    }

    // The key can expire between EXISTS and GET; that is an ordinary miss.
    let Some(bytes) = store.get(key).await.map_err(CacheFault::Read)? else {
        return Ok(None);
    };

    deserialize_entities(&bytes)
        .map(Some)
        .map_err(|err| CacheFault::Corrupt {
            key: key.to_string(),
            field: None,
            error: err.into(),
        })
}

async fn write_back<S, E>(
    store: &S,
    spec: &CacheKeySpec,
    entities: &[E],
) -> std::result::Result<(), CacheFault>
where
    S: KeyValueStore + ?Sized,
    E: Serialize,
{
    let bytes = serialize_entities(entities).map_err(|err| CacheFault::Write(err.into()))?;
    store
        .set(spec.key(), &bytes, spec.ttl())
        .await
        .map_err(CacheFault::Write)?;

    tracing::debug!(key = spec.key(), ttl = ?spec.ttl(), count = entities.len(), "Cached fetched result");
    Ok(())
}
