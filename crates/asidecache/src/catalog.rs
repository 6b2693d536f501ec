//! Category data access through the cache-aside layer.
//!
//! Lists are cached whole under one key per filter. Lookups by id share one
//! hash key holding a field per category, so each call only fetches the ids
//! nobody asked for yet.

use std::sync::Arc;
use std::time::Duration;

use asidecache_core::aside::{fetch_cached, fetch_merged, Lookup, Result};
use asidecache_core::cache::{CacheKeySpec, KeyValueStore};

use crate::models::Category;
use crate::storage::{CategoriesByIdQuery, CategoryFilter, CategoryListQuery, SqliteDatabase};

/// Hash key holding one field per category id.
pub const CATEGORIES_BY_ID_KEY: &str = "categories:by_id";

/// Cache key for a category list request.
///
/// Search terms are trimmed and ASCII-lowercased, matching `LIKE`, which only
/// ignores case for ASCII letters.
pub fn category_list_key(filter: &CategoryFilter) -> String {
    match filter.search_term() {
        Some(term) => format!("categories:search:{}", term.to_ascii_lowercase()),
        None => "categories:all".to_string(),
    }
}

/// Category reads served cache-first.
///
/// # Type Parameters
///
/// * `S` - The key-value store backing the cache
pub struct CategoryCatalog<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    list_query: CategoryListQuery,
    by_id_query: CategoriesByIdQuery,
    ttl: Duration,
}

impl<S> CategoryCatalog<S>
where
    S: KeyValueStore,
{
    /// Creates a catalog reading from `db` and caching in `store`.
    ///
    /// # Arguments
    ///
    /// * `store` - The cache store
    /// * `db` - The authoritative database
    /// * `ttl` - Expiry for cached lists and for the whole by-id hash. Zero
    ///   disables expiry.
    pub fn new(store: Arc<S>, db: &SqliteDatabase, ttl: Duration) -> Self {
        Self {
            store,
            list_query: db.list_query(),
            by_id_query: db.by_id_query(),
            ttl,
        }
    }

    /// Lists categories matching `filter`.
    ///
    /// `entities` is `None` when no category matches.
    pub async fn list(&self, filter: &CategoryFilter) -> Result<Lookup<Category>> {
        let spec = CacheKeySpec::new(category_list_key(filter)).with_ttl(self.ttl);

        let lookup = fetch_cached(
            self.store.as_ref(),
            &spec,
            &self.list_query,
            filter,
            Category::from,
        )
        .await?;

        log_lookup(spec.key(), &lookup);
        Ok(lookup)
    }

    /// Looks categories up by id.
    ///
    /// Unknown ids are left out. The result order does not follow `ids`.
    pub async fn by_ids(&self, ids: &[i64]) -> Result<Lookup<Category>> {
        let spec = CacheKeySpec::new(CATEGORIES_BY_ID_KEY).with_ttl(self.ttl);

        let lookup = fetch_merged(
            self.store.as_ref(),
            &spec,
            ids,
            &self.by_id_query,
            |category: Category| category,
            Category::from,
        )
        .await?;

        log_lookup(spec.key(), &lookup);
        Ok(lookup)
    }
}

fn log_lookup(key: &str, lookup: &Lookup<Category>) {
    let count = lookup.entities.as_ref().map(Vec::len);
    if lookup.is_degraded() {
        tracing::debug!(
            key,
            source = ?lookup.source,
            count,
            faults = lookup.faults.len(),
            "Served categories with cache faults"
        );
    } else {
        tracing::trace!(key, source = ?lookup.source, count, "Served categories");
    }
}
