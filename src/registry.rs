//! Library Registry Module
//!
//! Explicit registry of shared library instances keyed by a major name and
//! negotiated by minor version. A registration succeeds only when nothing
//! equal or newer is already present, so one instance per major name wins.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{CacheError, Result};

/// Major name this crate registers under.
pub const LIBRARY_MAJOR: &str = "RingCache-1.0";

/// Minor version this crate registers with.
pub const LIBRARY_MINOR: u32 = 2;

// == Library ==
/// A registered library instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Library {
    pub major: String,
    pub minor: u32,
}

// == Registration ==
/// Outcome of [`Registry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The caller's version is now the registered one.
    Registered { previous: Option<u32> },
    /// An equal or newer version is already registered; use it instead.
    Superseded { existing: u32 },
}

// == Registry ==
#[derive(Debug, Default)]
pub struct Registry {
    libraries: BTreeMap<String, Library>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `major` at `minor` unless an equal or newer minor exists.
    pub fn register(&mut self, major: impl Into<String>, minor: u32) -> Registration {
        let major = major.into();
        let previous = self.libraries.get(&major).map(|lib| lib.minor);
        if let Some(existing) = previous {
            if existing >= minor {
                debug!(%major, minor, existing, "library already registered");
                return Registration::Superseded { existing };
            }
        }

        debug!(%major, minor, ?previous, "library registered");
        self.libraries.insert(major.clone(), Library { major, minor });
        Registration::Registered { previous }
    }

    /// Looks up `major`, failing if it was never registered.
    pub fn get(&self, major: &str) -> Result<&Library> {
        self.find(major)
            .ok_or_else(|| CacheError::LibraryNotFound(major.to_string()))
    }

    /// Looks up `major` without failing.
    pub fn find(&self, major: &str) -> Option<&Library> {
        self.libraries.get(major)
    }

    /// Registered libraries in name order.
    pub fn libraries(&self) -> impl Iterator<Item = &Library> {
        self.libraries.values()
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}

/// Registers this crate under [`LIBRARY_MAJOR`] and [`LIBRARY_MINOR`].
pub fn register(registry: &mut Registry) -> Registration {
    registry.register(LIBRARY_MAJOR, LIBRARY_MINOR)
}
