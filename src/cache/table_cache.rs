//! Table Cache Module
//!
//! Key/value flavor of the ring cache.

use crate::cache::facade::{CacheCore, RingCache};
use crate::cache::{CacheKind, CacheStats, Table};
use crate::error::Result;
use crate::value::{Key, Value};

// == Table Cache ==
/// Key/value cache keeping the last `capacity` inserted values alive.
///
/// Once a value falls out of the ring its entry survives only as long as
/// something outside the cache still owns the value (or the key).
///
/// # Example
/// ```
/// use ringcache::{Table, TableCache};
///
/// let mut cache = TableCache::new(1).unwrap();
/// let kept = Table::new();
/// cache.set("kept", kept.clone());
/// cache.set("dropped", Table::new());
/// cache.set("latest", Table::new());
///
/// assert!(cache.get("kept").is_some());
/// assert!(cache.get("dropped").is_none());
/// assert!(cache.get("latest").is_some());
/// ```
#[derive(Debug)]
pub struct TableCache {
    core: CacheCore,
}

impl TableCache {
    const OPERATION: &'static str = "TableCache::new";

    // == Constructor ==
    /// Creates a cache with `size` ring slots and a fresh store.
    ///
    /// `size` must be a finite integral number of at least 1.
    pub fn new(size: impl Into<Value>) -> Result<Self> {
        Self::with_seed(size, Value::Nil)
    }

    /// Creates a cache adopting `seed` as its store.
    ///
    /// `seed` must be nil or a [`Table`]. The table is switched to weak mode
    /// and its entries are replayed through the ring as if inserted one at a
    /// time; the caller keeps sharing it.
    pub fn with_seed(size: impl Into<Value>, seed: impl Into<Value>) -> Result<Self> {
        let core = CacheCore::new(CacheKind::Table, Self::OPERATION, size.into(), seed.into())?;
        Ok(Self { core })
    }

    // == Set ==
    /// Stores `value` under `key` and pushes `value` onto the ring.
    ///
    /// Updating an existing key still consumes a ring slot; the previous
    /// value stays in the ring until the cursor overwrites it.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        self.core.insert(key.into(), value.into());
    }

    // == Get ==
    /// Retrieves the value under `key`, `None` if never set or reclaimed.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        self.core.store().get(key)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.core.store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RingCache for TableCache {
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
        self.set(key, value);
    }

    fn clear(&mut self) {
        self.core.clear();
    }

    /// Tables have no index order to restore; returns `len + 1`.
    fn reorder(&mut self) -> usize {
        self.len() + 1
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
