//! Cache Key Module
//!
//! Keys are non-nil values. [`KeyId`] is the identity a store orders entries
//! by; it never owns a reference-kind key, so a weakly held key can still be
//! located after its referent is gone.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::cache::Table;
use crate::error::CacheError;
use crate::value::{Function, Userdata, Value};

// == Key ==
/// A non-nil [`Value`] usable as a store key.
#[derive(Clone, PartialEq)]
pub struct Key(Value);

impl Key {
    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn as_number(&self) -> Option<f64> {
        self.0.as_number()
    }

    pub fn is_collectable(&self) -> bool {
        self.0.is_collectable()
    }

    pub(crate) fn id(&self) -> KeyId {
        match &self.0 {
            Value::Boolean(b) => KeyId::Boolean(*b),
            Value::Number(n) => KeyId::Number(NumberKey::new(*n)),
            Value::String(s) => KeyId::String(Rc::clone(s)),
            // Reference kinds: the address is stable while any weak handle survives.
            other => KeyId::Reference(other.address().unwrap_or_default()),
        }
    }
}

impl TryFrom<Value> for Key {
    type Error = CacheError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Nil => Err(CacheError::invalid_argument(1, "Key", "non-nil key", "nil")),
            other => Ok(Key(other)),
        }
    }
}

macro_rules! impl_key_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(v: $t) -> Self {
                    Key(Value::from(v))
                }
            }
        )*
    };
}

impl_key_from!(i32, i64, u32, u64, usize, f32, f64, bool, &str, String, Table, Function, Userdata);

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

// == Key Identity ==
/// Ordering identity of a key: numbers, then strings, then booleans, then
/// reference kinds by address.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum KeyId {
    Number(NumberKey),
    String(Rc<str>),
    Boolean(bool),
    Reference(usize),
}

/// Totally ordered number key. `-0.0` is folded into `0.0`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberKey(f64);

impl NumberKey {
    pub(crate) fn new(n: f64) -> Self {
        Self(if n == 0.0 { 0.0 } else { n })
    }
}

impl PartialEq for NumberKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NumberKey {}

impl PartialOrd for NumberKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NumberKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for NumberKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}
