//! Backing store implementations.
//!
//! The cache-aside layer only sees `BackingStoreFetcher`s; this module
//! provides the SQLite database they read from.

pub mod sqlite;

pub use sqlite::{
    CategoriesByIdQuery, CategoryFilter, CategoryListQuery, CategoryRow, SqliteDatabase,
};
