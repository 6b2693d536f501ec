//! Per-identifier cache-aside over one hash key, with batched backfill.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{hash_field, CacheError, CacheKeySpec, KeyValueStore, WriteBatch};
use crate::storage::BackingStoreFetcher;

use super::transform::{decode_cached, encode_for_field, rows_into_entities};
use super::{CacheAsideError, CacheFault, Identifiable, Lookup, Result, Source};

/// Resolves `ids` against the hash at `spec.key()`, fetching only the misses.
///
/// Each id is looked up as a hash field in one multi-get. Hits are decoded
/// and mapped with `from_cache`; misses (absent or undecodable fields) are
/// passed to `fetcher` in one call and mapped with `from_db`. Fetched entities
/// that have an [`Identifiable::identifier`] are written back as hash fields
/// in one atomic batch, followed by an expiry on the whole hash when the spec
/// has a TTL. That expiry is sent even when no entity was identifiable, and it
/// also resets the lifetime of every older field. An entity that fails to
/// serialize is left out of the batch and reported as a fault.
///
/// The result is the cache hits followed by the fetched entities. It is not
/// ordered like `ids`; callers that need input order must re-sort.
///
/// - An empty `ids` returns an empty sequence without touching either store.
/// - If the multi-get fails, every id is treated as missing.
/// - If the fetcher returns no rows, the hits are returned, or a not-found
///   [`Lookup`] when there were none.
/// - A failed backfill is reported as a fault and never discards results.
///
/// # Errors
///
/// Returns [`CacheAsideError::BackingStore`] when the fetcher fails.
pub async fn fetch_merged<S, F, I, C, E, FC, FD>(
    store: &S,
    spec: &CacheKeySpec,
    ids: &[I],
    fetcher: &F,
    from_cache: FC,
    from_db: FD,
) -> Result<Lookup<E>>
where
    S: KeyValueStore + ?Sized,
    F: BackingStoreFetcher<Params = Vec<I>> + ?Sized,
    I: Display + Clone + Send + Sync,
    C: DeserializeOwned,
    E: Serialize + Identifiable,
    FC: Fn(C) -> E,
    FD: Fn(F::Row) -> E,
{
    if ids.is_empty() {
        return Ok(Lookup::skipped());
    }

    let key = spec.key();
    let fields: Vec<String> = ids.iter().map(hash_field).collect();
    let mut faults = Vec::new();
    let mut cached = Vec::new();
    let mut missing = Vec::new();

    match read_fields(store, key, &fields).await {
        Ok(values) => {
            for ((id, field), value) in ids.iter().zip(&fields).zip(values) {
                let Some(bytes) = value else {
                    missing.push(id.clone());
                    continue;
                };
                match decode_cached(&bytes, &from_cache) {
                    Ok(entity) => cached.push(entity),
                    Err(err) => {
                        tracing::warn!(key, field = %field, error = %err, "Cached field is corrupt, treating as miss");
                        faults.push(CacheFault::Corrupt {
                            key: key.to_string(),
                            field: Some(field.clone()),
                            error: err.into(),
                        });
                        missing.push(id.clone());
                    }
                }
            }
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "Cache multi-get failed, fetching every id");
            faults.push(CacheFault::Read(err));
            missing.extend(ids.iter().cloned());
        }
    }

    tracing::trace!(key, hits = cached.len(), misses = missing.len(), "Hash lookup done");

    if missing.is_empty() {
        return Ok(Lookup::new(Some(cached), Source::Cache, faults));
    }

    let result = fetcher
        .fetch(&missing)
        .await
        .map_err(|err| CacheAsideError::backing_store(key, err))?;

    if result.is_empty() {
        tracing::trace!(key, "Backing store returned no rows for missing ids");
        return Ok(if cached.is_empty() {
            Lookup::not_found(faults)
        } else {
            Lookup::new(Some(cached), Source::Cache, faults)
        });
    }

    let fetched = rows_into_entities(result.rows, from_db);

    faults.extend(backfill(store, spec, &fetched).await);

    let source = if cached.is_empty() {
        Source::BackingStore
    } else {
        Source::Merged
    };
    cached.extend(fetched);

    Ok(Lookup::new(Some(cached), source, faults))
}

async fn read_fields<S>(
    store: &S,
    key: &str,
    fields: &[String],
) -> std::result::Result<Vec<Option<Vec<u8>>>, CacheError>
where
    S: KeyValueStore + ?Sized,
{
    let values = store.hash_multi_get(key, fields).await?;
    if values.len() != fields.len() {
        return Err(CacheError::OperationFailed(format!(
            "multi-get returned {} values for {} fields",
            values.len(),
            fields.len()
        )));
    }
    Ok(values)
}

async fn backfill<S, E>(store: &S, spec: &CacheKeySpec, entities: &[E]) -> Vec<CacheFault>
where
    S: KeyValueStore + ?Sized,
    E: Serialize + Identifiable,
{
    let key = spec.key();
    let mut faults = Vec::new();
    let mut batch = WriteBatch::new();

    for (field, encoded) in entities.iter().filter_map(encode_for_field) {
        match encoded {
            Ok(bytes) => {
                batch.hash_set(key, field, bytes);
            }
            Err(err) => {
                tracing::warn!(key, field = %field, error = %err, "Skipping unserializable entity");
                faults.push(CacheFault::Write(err.into()));
            }
        }
    }

    let fields = batch.len();
    if let Some(ttl) = spec.ttl() {
        batch.expire(key, ttl);
    }

    if batch.is_empty() {
        tracing::debug!(key, "Nothing to backfill");
        return faults;
    }

    match store.execute(batch).await {
        Ok(()) => {
            tracing::debug!(key, fields, ttl = ?spec.ttl(), "Backfilled hash cache");
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "Failed to backfill hash cache");
            faults.push(CacheFault::Write(err));
        }
    }

    faults
}
