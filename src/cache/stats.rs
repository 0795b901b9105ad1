//! Cache Statistics Module
//!
//! Snapshot of ring occupancy and store liveness.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// == Cache Kind ==
/// Which facade produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    Table,
    List,
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKind::Table => f.write_str("table"),
            CacheKind::List => f.write_str("list"),
        }
    }
}

impl FromStr for CacheKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(CacheKind::Table),
            "list" => Ok(CacheKind::List),
            other => Err(format!("unknown cache kind '{}'", other)),
        }
    }
}

// == Cache Stats ==
/// Point-in-time view of a cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub kind: CacheKind,
    /// Number of ring slots
    pub capacity: usize,
    /// Next ring slot to overwrite
    pub cursor: usize,
    /// Ring slots currently holding a value
    pub occupied: usize,
    /// Store entries still reachable
    pub live_entries: usize,
    /// Insertions since construction or the last clear
    pub insertions: u64,
    /// Dead entries purged by sweeps
    pub reclaimed: u64,
    /// Completed reorders
    pub reorders: u64,
}

impl CacheStats {
    /// Fraction of live store entries currently owned by the ring.
    ///
    /// Values above 1.0 never occur; values well below it mean most entries
    /// are kept alive by owners outside the cache.
    pub fn ring_share(&self) -> f64 {
        if self.live_entries == 0 {
            0.0
        } else {
            (self.occupied.min(self.live_entries)) as f64 / self.live_entries as f64
        }
    }
}
