use serde::{Deserialize, Serialize};

use asidecache_core::aside::Identifiable;

use crate::storage::CategoryRow;

/// A place category as served to callers and stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl Identifiable for Category {
    fn identifier(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.category_id,
            name: row.name,
            slug: row.slug,
        }
    }
}
