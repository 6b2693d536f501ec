//! Category reads exposed as backing store fetchers.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use asidecache_core::storage::{BackingStoreFetcher, QueryResult, Result};

use super::conversions::{name_prefix_pattern, row_to_category, CategoryRow};
use super::error::{map_tokio_rusqlite_error, wrap_err};
use super::schema;

/// Request object for the category list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Case-insensitive name prefix. Blank means no filter.
    pub search: Option<String>,
}

impl CategoryFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }

    /// The trimmed search term, or `None` when it is absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// Lists categories, optionally filtered by name prefix.
#[derive(Clone)]
pub struct CategoryListQuery {
    conn: Connection,
}

impl CategoryListQuery {
    pub(super) fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl BackingStoreFetcher for CategoryListQuery {
    type Params = CategoryFilter;
    type Row = CategoryRow;

    async fn fetch(&self, params: &CategoryFilter) -> Result<QueryResult<CategoryRow>> {
        let pattern = params.search_term().map(name_prefix_pattern);

        let rows = self
            .conn
            .call(move |conn| {
                let rows = match pattern {
                    Some(pattern) => {
                        let mut stmt = conn
                            .prepare(schema::SELECT_CATEGORIES_BY_NAME_PREFIX)
                            .map_err(wrap_err)?;
                        let rows = stmt
                            .query_map([&pattern], row_to_category)
                            .map_err(wrap_err)?;
                        rows.collect::<rusqlite::Result<Vec<_>>>()
                    }
                    None => {
                        let mut stmt = conn
                            .prepare(schema::SELECT_ALL_CATEGORIES)
                            .map_err(wrap_err)?;
                        let rows = stmt.query_map([], row_to_category).map_err(wrap_err)?;
                        rows.collect::<rusqlite::Result<Vec<_>>>()
                    }
                };
                rows.map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        tracing::trace!(count = rows.len(), "Fetched categories");
        Ok(QueryResult::new(rows))
    }
}

/// Looks categories up by id. Unknown ids are simply absent from the rows.
#[derive(Clone)]
pub struct CategoriesByIdQuery {
    conn: Connection,
}

impl CategoriesByIdQuery {
    pub(super) fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl BackingStoreFetcher for CategoriesByIdQuery {
    type Params = Vec<i64>;
    type Row = CategoryRow;

    async fn fetch(&self, ids: &Vec<i64>) -> Result<QueryResult<CategoryRow>> {
        if ids.is_empty() {
            return Ok(QueryResult::empty());
        }

        let ids = ids.clone();
        let rows = self
            .conn
            .call(move |conn| {
                let sql = schema::select_categories_by_ids(ids.len());
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(ids.iter()), row_to_category)
                    .map_err(wrap_err)?;
                rows.collect::<rusqlite::Result<Vec<_>>>().map_err(wrap_err)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        tracing::trace!(count = rows.len(), "Fetched categories by id");
        Ok(QueryResult::new(rows))
    }
}
