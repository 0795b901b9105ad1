//! Cache Store Module
//!
//! Shared associative container backing every cache.
//!
//! A [`Table`] runs in one of two modes:
//! - strong: a plain structured value, every entry owns its key and value
//! - weak: collectable keys and values are held through `Weak` handles, so an
//!   entry silently dies once the rest of the program drops its referent
//!
//! Dead entries read as absent immediately and are purged by [`Table::sweep`].
//! Entries whose key and value are both primitive are always held strongly.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::cache::entry::Entry;
use crate::value::{Key, KeyId, Value};

#[derive(Default)]
struct TableData {
    weak: bool,
    entries: BTreeMap<KeyId, Entry>,
}

// == Table ==
/// Shared handle to an ordered key/value store.
///
/// Cloning a `Table` clones the handle, not the contents; two handles compare
/// equal only when they point at the same store.
#[derive(Clone, Default)]
pub struct Table(Rc<RefCell<TableData>>);

impl Table {
    // == Constructor ==
    /// Creates an empty table in strong mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table in weak mode.
    pub fn weak() -> Self {
        let table = Self::new();
        table.0.borrow_mut().weak = true;
        table
    }

    /// Creates a strong table holding `values` at keys `1..=n`.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let table = Self::new();
        for (i, value) in values.into_iter().enumerate() {
            table.set(i + 1, value);
        }
        table
    }

    // == Mode ==
    pub fn is_weak(&self) -> bool {
        self.0.borrow().weak
    }

    /// Switches mode, re-holding every live entry and dropping dead ones.
    pub fn set_weak(&self, weak: bool) {
        let previous = {
            let mut data = self.0.borrow_mut();
            if data.weak == weak {
                return;
            }
            data.weak = weak;
            std::mem::take(&mut data.entries)
        };

        let entries: BTreeMap<KeyId, Entry> = previous
            .iter()
            .filter_map(|(id, entry)| entry.rehold(weak).map(|e| (id.clone(), e)))
            .collect();
        self.0.borrow_mut().entries = entries;
        // Values owned only by the strong entries die here.
        drop(previous);
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Returns `None` both for keys never set and for reclaimed entries.
    pub fn get(&self, key: impl Into<Key>) -> Option<Value> {
        let id = key.into().id();
        self.0.borrow().entries.get(&id).and_then(Entry::value)
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.get(key).is_some()
    }

    // == Set ==
    /// Stores `value` under `key`. Storing nil removes the entry.
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        let id = key.id();

        if value.is_nil() {
            let removed = self.0.borrow_mut().entries.remove(&id);
            drop(removed);
            return;
        }

        let weak = self.is_weak();
        let replaced = self
            .0
            .borrow_mut()
            .entries
            .insert(id, Entry::new(key, value, weak));
        drop(replaced);
    }

    // == Remove ==
    /// Removes `key`, returning its value if the entry was live.
    pub fn remove(&self, key: impl Into<Key>) -> Option<Value> {
        let id = key.into().id();
        let removed = self.0.borrow_mut().entries.remove(&id);
        removed.and_then(|e| e.value())
    }

    // == Length ==
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.0
            .borrow()
            .entries
            .values()
            .filter(|e| e.is_live())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the largest `n` such that keys `1..=n` are all live.
    pub fn border(&self) -> usize {
        let data = self.0.borrow();
        let mut n = 0;
        while let Some(entry) = data.entries.get(&Key::from(n + 1).id()) {
            if !entry.is_live() {
                break;
            }
            n += 1;
        }
        n
    }

    // == Iteration ==
    /// Snapshot of live entries in key order.
    pub fn pairs(&self) -> Vec<(Key, Value)> {
        self.0
            .borrow()
            .entries
            .values()
            .filter_map(Entry::load)
            .collect()
    }

    /// Iterates over a snapshot of live entries in key order.
    ///
    /// Entries reclaimed after the call are still yielded; entries reclaimed
    /// before it are not.
    pub fn iter(&self) -> impl Iterator<Item = (Key, Value)> {
        self.pairs().into_iter()
    }

    pub fn keys(&self) -> Vec<Key> {
        self.iter().map(|(k, _)| k).collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.iter().map(|(_, v)| v).collect()
    }

    // == Sweep ==
    /// Purges dead entries, returning how many were removed.
    pub fn sweep(&self) -> usize {
        let mut data = self.0.borrow_mut();
        let before = data.entries.len();
        data.entries.retain(|_, e| e.is_live());
        before - data.entries.len()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        let entries = std::mem::take(&mut self.0.borrow_mut().entries);
        drop(entries);
    }

    pub fn ptr_eq(&self, other: &Table) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn downgrade(&self) -> WeakTable {
        WeakTable(Rc::downgrade(&self.0))
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "table: {:#x}", self.address())
    }
}

// == Weak Table ==
/// Non-owning handle to a [`Table`].
#[derive(Clone)]
pub(crate) struct WeakTable(Weak<RefCell<TableData>>);

impl WeakTable {
    pub(crate) fn upgrade(&self) -> Option<Table> {
        self.0.upgrade().map(Table)
    }

    pub(crate) fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }
}
