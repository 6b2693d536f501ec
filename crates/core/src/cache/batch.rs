use std::time::Duration;

/// One write queued in a [`WriteBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Sets one field of a hash key.
    HashSet {
        key: String,
        field: String,
        value: Vec<u8>,
    },
    /// Sets the expiry of a whole key.
    Expire { key: String, ttl: Duration },
}

/// An ordered group of writes executed by the store in one atomic round trip.
///
/// A store either applies every operation or reports the batch as failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a hash field write.
    pub fn hash_set(
        &mut self,
        key: impl Into<String>,
        field: impl Into<String>,
        value: Vec<u8>,
    ) -> &mut Self {
        self.ops.push(BatchOp::HashSet {
            key: key.into(),
            field: field.into(),
            value,
        });
        self
    }

    /// Queues an expiry for the whole key.
    pub fn expire(&mut self, key: impl Into<String>, ttl: Duration) -> &mut Self {
        self.ops.push(BatchOp::Expire {
            key: key.into(),
            ttl,
        });
        self
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl IntoIterator for WriteBatch {
    type Item = BatchOp;
    type IntoIter = std::vec::IntoIter<BatchOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}
