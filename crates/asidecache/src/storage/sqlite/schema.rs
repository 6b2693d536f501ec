//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    category_id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE
);

CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(name);
"#;

pub const INSERT_CATEGORY: &str = r#"
INSERT INTO categories (name, slug)
VALUES (?1, ?2)
"#;

pub const INSERT_CATEGORY_IF_MISSING: &str = r#"
INSERT OR IGNORE INTO categories (name, slug)
VALUES (?1, ?2)
"#;

pub const SELECT_ALL_CATEGORIES: &str = r#"
SELECT category_id, name, slug
FROM categories
ORDER BY category_id ASC
"#;

pub const SELECT_CATEGORIES_BY_NAME_PREFIX: &str = r#"
SELECT category_id, name, slug
FROM categories
WHERE name LIKE ?1 ESCAPE '\'
ORDER BY category_id ASC
"#;

/// Builds the id lookup query with one placeholder per id.
///
/// `count` must be at least 1.
pub fn select_categories_by_ids(count: usize) -> String {
    let placeholders = (1..=count)
        .map(|n| format!("?{n}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT category_id, name, slug FROM categories \
         WHERE category_id IN ({placeholders}) ORDER BY category_id ASC"
    )
}
