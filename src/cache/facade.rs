//! Cache Facade Module
//!
//! State and bookkeeping shared by [`TableCache`](crate::cache::TableCache)
//! and [`ListCache`](crate::cache::ListCache): argument validation, seed
//! adoption, and the store-write-then-ring-push insertion step.

use tracing::{debug, warn};

use crate::cache::{CacheKind, CacheStats, Ring, Table};
use crate::error::{CacheError, Result};
use crate::value::{Key, Value};

// == Ring Cache ==
/// Operations common to every cache flavor.
pub trait RingCache {
    /// Number of ring slots.
    fn capacity(&self) -> usize;

    /// Next ring slot to overwrite.
    fn cursor(&self) -> usize;

    /// The backing store, shared with any caller that seeded it.
    fn store(&self) -> &Table;

    /// Values the ring currently keeps alive, oldest first.
    fn ring_values(&self) -> Vec<Value>;

    /// Flavor-native write: `set` for tables, `set_at` for lists.
    fn insert(&mut self, key: Key, value: Value);

    /// Retrieves the value under `key`, `None` if never set or reclaimed.
    fn lookup(&self, key: &Key) -> Option<Value> {
        self.store().get(key)
    }

    /// Wipes the store and the ring and resets every counter.
    fn clear(&mut self);

    /// Compacts the store; returns the first unused index.
    fn reorder(&mut self) -> usize;

    /// Fails on the first entry that can never be reclaimed.
    ///
    /// Walks the whole store, so cost grows with its size.
    fn check(&self) -> Result<()>;

    /// Purges reclaimed entries from the store, returning how many went.
    fn collect(&mut self) -> usize;

    fn stats(&self) -> CacheStats;
}

// == Validation ==
/// Accepts a finite integral number `>= 1`.
///
/// Values beyond `usize::MAX` saturate; the ring allocates lazily.
pub(crate) fn validate_capacity(operation: &'static str, size: &Value) -> Result<usize> {
    match size.as_number() {
        Some(n) if n >= 1.0 && n < f64::INFINITY && n == n.floor() => Ok(n as usize),
        _ => Err(CacheError::invalid_argument(
            1,
            operation,
            "positive integer",
            size.to_string(),
        )),
    }
}

/// Accepts nil (fresh store) or a table (adopted store).
pub(crate) fn validate_seed(operation: &'static str, seed: Value) -> Result<Option<Table>> {
    match seed {
        Value::Nil => Ok(None),
        Value::Table(t) => Ok(Some(t)),
        other => Err(CacheError::invalid_argument(
            2,
            operation,
            "table",
            other.type_name(),
        )),
    }
}

// == Cache Core ==
#[derive(Debug)]
pub(crate) struct CacheCore {
    kind: CacheKind,
    ring: Ring<Value>,
    store: Table,
    insertions: u64,
    reclaimed: u64,
    reorders: u64,
}

impl CacheCore {
    /// Validates arguments and builds the core, replaying any seed entries
    /// through the ring in store order.
    pub(crate) fn new(
        kind: CacheKind,
        operation: &'static str,
        size: Value,
        seed: Value,
    ) -> Result<Self> {
        let capacity = validate_capacity(operation, &size)?;
        let seed = validate_seed(operation, seed)?;

        let mut core = Self {
            kind,
            ring: Ring::new(capacity),
            store: Table::new(),
            insertions: 0,
            reclaimed: 0,
            reorders: 0,
        };

        if let Some(store) = seed {
            // Fill the ring while the seed still owns its values.
            let pairs = store.pairs();
            let seeded = pairs.len();
            for (_, value) in pairs {
                core.push(value);
            }
            core.store = store;
            debug!(%kind, capacity, seeded, "adopted seed table");
        }
        core.store.set_weak(true);

        Ok(core)
    }

    pub(crate) fn kind(&self) -> CacheKind {
        self.kind
    }

    pub(crate) fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub(crate) fn cursor(&self) -> usize {
        self.ring.cursor()
    }

    pub(crate) fn store(&self) -> &Table {
        &self.store
    }

    pub(crate) fn ring_values(&self) -> Vec<Value> {
        self.ring.iter().cloned().collect()
    }

    // == Insert ==
    /// Writes the store entry, then hands ownership of the value to the ring.
    pub(crate) fn insert(&mut self, key: Key, value: Value) {
        self.store.set(key, value.clone());
        self.push(value);
    }

    fn push(&mut self, value: Value) {
        self.ring.push(value);
        self.insertions += 1;
    }

    // == Clear ==
    pub(crate) fn clear(&mut self) {
        self.store.clear();
        self.ring.clear();
        self.insertions = 0;
        self.reclaimed = 0;
        self.reorders = 0;
        debug!(kind = %self.kind, "cache cleared");
    }

    pub(crate) fn record_reorder(&mut self) {
        self.reorders += 1;
    }

    // == Check ==
    pub(crate) fn check(&self) -> Result<()> {
        for (key, value) in self.store.iter() {
            if !key.is_collectable() && !value.is_collectable() {
                warn!(kind = %self.kind, %key, %value, "uncollectable cache entry");
                return Err(CacheError::UncollectableEntry {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    // == Collect ==
    pub(crate) fn collect(&mut self) -> usize {
        let removed = self.store.sweep();
        self.reclaimed += removed as u64;
        if removed > 0 {
            debug!(kind = %self.kind, removed, "swept reclaimed entries");
        }
        removed
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            kind: self.kind,
            capacity: self.ring.capacity(),
            cursor: self.ring.cursor(),
            occupied: self.ring.occupied(),
            live_entries: self.store.len(),
            insertions: self.insertions,
            reclaimed: self.reclaimed,
            reorders: self.reorders,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_accepts_positive_integers() {
        for size in [1.0, 10.0, 32000.0] {
            assert_eq!(
                validate_capacity("New", &Value::from(size)).unwrap(),
                size as usize
            );
        }
    }

    #[test]
    fn test_capacity_saturates_huge_values() {
        assert_eq!(validate_capacity("New", &Value::from(1e20)).unwrap(), usize::MAX);
        let core = CacheCore::new(CacheKind::Table, "New", Value::from(1e20), Value::Nil).unwrap();
        assert_eq!(core.capacity(), usize::MAX);
        assert_eq!(core.stats().occupied, 0);
    }

    #[test]
    fn test_capacity_rejects_bad_numbers() {
        for size in [0.0, -1.0, 1.5, f64::INFINITY, f64::NAN] {
            let err = validate_capacity("New", &Value::from(size)).unwrap_err();
            assert!(matches!(err, CacheError::InvalidArgument { position: 1, .. }));
        }
    }

    #[test]
    fn test_capacity_message_shows_value() {
        let err = validate_capacity("New", &Value::from(1.5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bad argument #1 to New (positive integer expected, got '1.5')"
        );
        let err = validate_capacity("New", &Value::from("10")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bad argument #1 to New (positive integer expected, got '10')"
        );
    }

    #[test]
    fn test_seed_rejects_non_tables() {
        for seed in [Value::from(true), Value::from("t"), Value::from(3)] {
            let name = seed.type_name();
            let err = validate_seed("New", seed).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Bad argument #2 to New (table expected, got '{}')", name)
            );
        }
    }

    #[test]
    fn test_seed_accepts_nil_and_tables() {
        assert!(validate_seed("New", Value::Nil).unwrap().is_none());
        let t = Table::new();
        assert_eq!(validate_seed("New", Value::from(t.clone())).unwrap(), Some(t));
    }

    #[test]
    fn test_core_store_is_weak() {
        let core = CacheCore::new(CacheKind::Table, "New", Value::from(2), Value::Nil).unwrap();
        assert!(core.store().is_weak());
        assert_eq!(core.capacity(), 2);
    }

    #[test]
    fn test_core_seed_replays_through_ring() {
        let seed = Table::from_values(["a", "b", "c"]);
        let core =
            CacheCore::new(CacheKind::List, "New", Value::from(2), Value::from(seed.clone()))
                .unwrap();

        assert!(core.store().ptr_eq(&seed));
        assert_eq!(core.cursor(), 1);
        assert_eq!(core.ring_values(), vec![Value::from("b"), Value::from("c")]);
        assert_eq!(core.stats().insertions, 3);
    }
}
