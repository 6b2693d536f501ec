//! SQLite backing store.
//!
//! Uses `rusqlite` for synchronous access and `tokio-rusqlite` to run it on a
//! dedicated thread. Each read the catalog caches is exposed as its own
//! `BackingStoreFetcher`.

mod conversions;
mod database;
mod error;
mod fetcher;
mod schema;

pub use conversions::CategoryRow;
pub use database::SqliteDatabase;
pub use fetcher::{CategoriesByIdQuery, CategoryFilter, CategoryListQuery};
