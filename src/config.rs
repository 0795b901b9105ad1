//! Configuration Module
//!
//! Handles loading the demo cache configuration from environment variables.

use std::env;

use crate::cache::{CacheKind, ListCache, RingCache, TableCache};
use crate::error::Result;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of ring slots
    pub capacity: usize,
    /// Cache flavor to build
    pub kind: CacheKind,
    /// Insertions performed by the demo run
    pub demo_inserts: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `RINGCACHE_CAPACITY` - Ring slots (default: 32)
    /// - `RINGCACHE_KIND` - `list` or `table` (default: list)
    /// - `RINGCACHE_DEMO_INSERTS` - Demo insertions (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env::var("RINGCACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
            kind: env::var("RINGCACHE_KIND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.kind),
            demo_inserts: env::var("RINGCACHE_DEMO_INSERTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.demo_inserts),
        }
    }

    /// Builds the configured cache flavor.
    pub fn build(&self) -> Result<Box<dyn RingCache>> {
        Ok(match self.kind {
            CacheKind::Table => Box::new(TableCache::new(self.capacity)?),
            CacheKind::List => Box::new(ListCache::new(self.capacity)?),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 32,
            kind: CacheKind::List,
            demo_inserts: 100,
        }
    }
}
