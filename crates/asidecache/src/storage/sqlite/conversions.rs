//! SQLite row conversion functions.
//!
//! Pure functions, testable without database access.

use rusqlite::Row;

/// A raw `categories` row as the database returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub category_id: i64,
    pub name: String,
    pub slug: String,
}

/// Convert a SQLite row to a CategoryRow.
///
/// Expected columns: category_id, name, slug
pub fn row_to_category(row: &Row) -> rusqlite::Result<CategoryRow> {
    Ok(CategoryRow {
        category_id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
    })
}

/// Builds a `LIKE` pattern matching names that start with `prefix`.
///
/// `%`, `_` and the escape character itself are matched literally.
pub fn name_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
