//! Store Entry Module
//!
//! A store entry pairs a key with a value, each held either strongly or
//! through a weak handle depending on the store's mode and the value's kind.

use crate::value::{Key, Value, WeakRef};

// == Slot ==
/// One half of an entry.
#[derive(Clone)]
pub(crate) enum Slot {
    Strong(Value),
    Weak(WeakRef),
}

impl Slot {
    /// Holds `value` weakly when `weak` is set and the value is collectable.
    pub(crate) fn hold(value: Value, weak: bool) -> Self {
        if weak {
            if let Some(handle) = value.downgrade() {
                return Slot::Weak(handle);
            }
        }
        Slot::Strong(value)
    }

    pub(crate) fn load(&self) -> Option<Value> {
        match self {
            Slot::Strong(v) => Some(v.clone()),
            Slot::Weak(w) => w.upgrade(),
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        match self {
            Slot::Strong(_) => true,
            Slot::Weak(w) => w.is_live(),
        }
    }
}

// == Entry ==
/// A key/value pair inside a store.
///
/// An entry is live only while both halves are: a weak key or weak value
/// losing its last owner kills the whole entry.
#[derive(Clone)]
pub(crate) struct Entry {
    key: Slot,
    value: Slot,
}

impl Entry {
    pub(crate) fn new(key: Key, value: Value, weak: bool) -> Self {
        Self {
            key: Slot::hold(key.into_value(), weak),
            value: Slot::hold(value, weak),
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.key.is_live() && self.value.is_live()
    }

    /// Returns the value if the entry is still live.
    pub(crate) fn value(&self) -> Option<Value> {
        if !self.key.is_live() {
            return None;
        }
        self.value.load()
    }

    /// Returns both halves if the entry is still live.
    pub(crate) fn load(&self) -> Option<(Key, Value)> {
        let key = self.key.load()?;
        let value = self.value.load()?;
        Key::try_from(key).ok().map(|k| (k, value))
    }

    /// Re-holds both halves under a new mode.
    ///
    /// Returns `None` when the entry is already dead.
    pub(crate) fn rehold(&self, weak: bool) -> Option<Self> {
        let (key, value) = self.load()?;
        Some(Self::new(key, value, weak))
    }
}
