//! SQLite database handle.

use tokio_rusqlite::Connection;

use asidecache_core::storage::{FetchError, Result};

use super::error::{map_tokio_rusqlite_error, wrap_err};
use super::fetcher::{CategoriesByIdQuery, CategoryListQuery};
use super::schema;

/// Categories inserted by [`SqliteDatabase::seed_demo`], as `(name, slug)`.
pub const DEMO_CATEGORIES: &[(&str, &str)] = &[
    ("Beaches", "beaches"),
    ("Mountains", "mountains"),
    ("Museums", "museums"),
    ("Street Food", "street-food"),
    ("Night Markets", "night-markets"),
    ("Temples", "temples"),
    ("Waterfalls", "waterfalls"),
    ("Caves", "caves"),
];

/// SQLite database holding the `categories` table.
///
/// Cloning is cheap; clones share the same background connection.
#[derive(Clone)]
pub struct SqliteDatabase {
    conn: Connection,
}

impl SqliteDatabase {
    /// Opens a file-based database, creating the file and schema if needed.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing - data is lost when the last clone is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| FetchError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }

    /// Inserts one category and returns its id.
    pub async fn insert_category(&self, name: &str, slug: &str) -> Result<i64> {
        let name = name.to_string();
        let slug = slug.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_CATEGORY, [&name, &slug])
                    .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    /// Inserts [`DEMO_CATEGORIES`] in one transaction, skipping slugs that
    /// already exist. Returns how many rows were inserted.
    pub async fn seed_demo(&self) -> Result<usize> {
        let inserted = self
            .conn
            .call(|conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let mut inserted = 0;
                {
                    let mut stmt = tx
                        .prepare(schema::INSERT_CATEGORY_IF_MISSING)
                        .map_err(wrap_err)?;
                    for (name, slug) in DEMO_CATEGORIES {
                        inserted += stmt.execute([name, slug]).map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(inserted)
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        tracing::debug!(inserted, "Seeded demo categories");
        Ok(inserted)
    }

    /// Fetcher for the category list, optionally filtered by name prefix.
    pub fn list_query(&self) -> CategoryListQuery {
        CategoryListQuery::new(self.conn.clone())
    }

    /// Fetcher for categories by id.
    pub fn by_id_query(&self) -> CategoriesByIdQuery {
        CategoriesByIdQuery::new(self.conn.clone())
    }
}
