//! ringcache - A FIFO ring cache over a weak store
//!
//! Insertions write into a shared store and push the value onto a fixed-size
//! ring. Values falling out of the ring stay reachable through the store
//! until their last outside owner drops them.

pub mod cache;
pub mod config;
pub mod error;
pub mod registry;
pub mod value;

pub use cache::{reindex, CacheKind, CacheStats, ListCache, Ring, RingCache, Table, TableCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use registry::{register, Library, Registration, Registry, LIBRARY_MAJOR, LIBRARY_MINOR};
pub use value::{Function, Key, Userdata, Value};
