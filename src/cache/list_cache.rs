//! List Cache Module
//!
//! Sequence flavor of the ring cache: values are appended at increasing
//! integer indices, and reclaimed entries leave gaps until [`RingCache::reorder`]
//! compacts the store.

use tracing::debug;

use crate::cache::facade::{CacheCore, RingCache};
use crate::cache::{reindex, CacheKind, CacheStats, Table};
use crate::error::Result;
use crate::value::{Key, Value};

// == List Cache ==
/// Append-oriented cache keeping the last `capacity` values alive.
///
/// # Example
/// ```
/// use ringcache::{ListCache, RingCache, Table};
///
/// let mut cache = ListCache::new(1).unwrap();
/// cache.append("foo");
/// cache.append(Table::new());
/// cache.append(Table::new());
///
/// // "foo" is a primitive and never reclaimed; the first table is gone.
/// assert_eq!(cache.reorder(), 3);
/// assert_eq!(cache.len(), 2);
/// ```
#[derive(Debug)]
pub struct ListCache {
    core: CacheCore,
    /// Index the next append writes to
    next_index: usize,
}

impl ListCache {
    const OPERATION: &'static str = "ListCache::new";

    // == Constructor ==
    /// Creates a cache with `size` ring slots and an empty store.
    pub fn new(size: impl Into<Value>) -> Result<Self> {
        Self::with_seed(size, Value::Nil)
    }

    /// Creates a cache adopting `seed` as its store.
    ///
    /// Seed entries are replayed through the ring in index order. Appends
    /// continue after the largest positive integer key of the seed.
    pub fn with_seed(size: impl Into<Value>, seed: impl Into<Value>) -> Result<Self> {
        let core = CacheCore::new(CacheKind::List, Self::OPERATION, size.into(), seed.into())?;
        let next_index = core
            .store()
            .keys()
            .iter()
            .filter_map(|k| k.as_number().and_then(as_index))
            .max()
            .map_or(1, |n| n.saturating_add(1));
        Ok(Self { core, next_index })
    }

    // == Append ==
    /// Stores `value` at the next index and pushes it onto the ring.
    ///
    /// Returns the index written. Appending nil deletes at that index, still
    /// consumes a ring slot, and leaves a gap in the list.
    pub fn append(&mut self, value: impl Into<Value>) -> usize {
        let index = self.next_index;
        self.next_index = self.next_index.saturating_add(1);
        self.core.insert(Key::from(index), value.into());
        index
    }

    // == Set At ==
    /// Stores `value` under `key` and pushes it onto the ring.
    ///
    /// Key `0` means "append". Writing at or past the append index moves the
    /// append index beyond `key`.
    pub fn set_at(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match key.as_number() {
            Some(n) if n == 0.0 => {
                self.append(value);
            }
            Some(n) => {
                if let Some(index) = as_index(n) {
                    if index >= self.next_index {
                        self.next_index = index.saturating_add(1);
                    }
                }
                self.core.insert(key, value);
            }
            None => self.core.insert(key, value),
        }
    }

    // == Get ==
    /// Retrieves the value under `key`, `None` if never set or reclaimed.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.core.store().get(key)
    }

    /// Length of the gapless prefix `1..=n` of the store.
    pub fn len(&self) -> usize {
        self.core.store().border()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index the next append will write to.
    pub fn next_index(&self) -> usize {
        self.next_index
    }
}

/// Positive integral numbers map to list indices.
fn as_index(n: f64) -> Option<usize> {
    if n >= 1.0 && n.is_finite() && n == n.floor() {
        Some(n as usize)
    } else {
        None
    }
}

impl RingCache for ListCache {
    fn capacity(&self) -> usize {
        self.core.capacity()
    }

    fn cursor(&self) -> usize {
        self.core.cursor()
    }

    fn store(&self) -> &Table {
        self.core.store()
    }

    fn ring_values(&self) -> Vec<Value> {
        self.core.ring_values()
    }

    fn insert(&mut self, key: Key, value: Value) {
        self.set_at(key, value);
    }

    fn clear(&mut self) {
        self.core.clear();
        self.next_index = 1;
    }

    /// Renumbers surviving entries to `1..=n` and returns `n + 1`.
    ///
    /// The ring is left untouched: it holds values, not indices.
    fn reorder(&mut self) -> usize {
        self.core.collect();
        let next = reindex(self.core.store());
        self.next_index = next;
        self.core.record_reorder();
        debug!(kind = %self.core.kind(), next, "reordered list cache");
        next
    }

    fn check(&self) -> Result<()> {
        self.core.check()
    }

    fn collect(&mut self) -> usize {
        self.core.collect()
    }

    fn stats(&self) -> CacheStats {
        self.core.stats()
    }
}
