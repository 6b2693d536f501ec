/// Rows returned by a backing store read, with the store-reported row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<R> {
    pub rows: Vec<R>,
    pub row_count: u64,
}

impl<R> QueryResult<R> {
    /// Wraps `rows`, deriving the row count from their number.
    pub fn new(rows: Vec<R>) -> Self {
        let row_count = rows.len() as u64;
        Self { rows, row_count }
    }

    /// A result with no rows.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// True when the store reported zero rows or returned none.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.rows.is_empty()
    }
}

impl<R> From<Vec<R>> for QueryResult<R> {
    fn from(rows: Vec<R>) -> Self {
        Self::new(rows)
    }
}
