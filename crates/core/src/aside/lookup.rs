use super::CacheFault;

/// Where the entities of a [`Lookup`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Served entirely from the cache.
    Cache,
    /// Served entirely by the backing store.
    BackingStore,
    /// Part cache hits, part backing store rows.
    Merged,
    /// Nothing was asked for, so neither store was touched.
    Skipped,
}

/// Outcome of a cache-aside read.
///
/// `entities` is `None` only when the backing store authoritatively returned
/// zero rows and the cache had nothing either. A cached empty sequence is
/// `Some(vec![])`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<E> {
    pub entities: Option<Vec<E>>,
    pub source: Source,
    /// Cache problems absorbed while serving this read.
    pub faults: Vec<CacheFault>,
}

impl<E> Lookup<E> {
    pub(crate) fn new(entities: Option<Vec<E>>, source: Source, faults: Vec<CacheFault>) -> Self {
        Self {
            entities,
            source,
            faults,
        }
    }

    pub(crate) fn skipped() -> Self {
        Self::new(Some(Vec::new()), Source::Skipped, Vec::new())
    }

    pub(crate) fn not_found(faults: Vec<CacheFault>) -> Self {
        Self::new(None, Source::BackingStore, faults)
    }

    /// True when the backing store confirmed there is nothing to return.
    pub fn is_not_found(&self) -> bool {
        self.entities.is_none()
    }

    /// True when at least one cache problem was absorbed.
    pub fn is_degraded(&self) -> bool {
        !self.faults.is_empty()
    }

    pub fn into_entities(self) -> Option<Vec<E>> {
        self.entities
    }
}
