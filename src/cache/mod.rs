//! Cache Module
//!
//! Ring caches over a weak store. The ring keeps the last N inserted values
//! alive; everything older survives only while something else owns it.

mod entry;
mod facade;
mod list_cache;
mod reindexer;
mod ring;
mod stats;
mod store;
mod table_cache;


// Re-export public types
pub use facade::RingCache;
pub use list_cache::ListCache;
pub use reindexer::reindex;
pub use ring::Ring;
pub use stats::{CacheKind, CacheStats};
pub use store::Table;
pub use table_cache::TableCache;

pub(crate) use store::WeakTable;
