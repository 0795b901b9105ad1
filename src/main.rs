//! ringcache demo
//!
//! Fills a ring cache with short-lived tables, keeps a few of them alive from
//! the outside, then reports what survived.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ringcache::{register, CacheKind, Config, Key, Registration, Registry, RingCache, Table};

/// Every n-th inserted table is also owned by the demo itself.
const KEEP_EVERY: usize = 10;

/// Entry point for the demo run.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Register the library and build the configured cache
/// 4. Insert tables, sweep, reorder, and run the uncollectable check
/// 5. Print the final statistics as JSON
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ringcache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: capacity={}, kind={}, demo_inserts={}",
        config.capacity, config.kind, config.demo_inserts
    );

    let mut registry = Registry::new();
    if let Registration::Superseded { existing } = register(&mut registry) {
        warn!("ringcache already registered at minor {}", existing);
    }

    let mut cache = config.build().context("failed to build cache")?;

    let mut owned = Vec::new();
    for i in 0..config.demo_inserts {
        let table = Table::from_values([i]);
        if i % KEEP_EVERY == 0 {
            owned.push(table.clone());
        }
        let key = match config.kind {
            // Index 0 appends.
            CacheKind::List => Key::from(0),
            CacheKind::Table => Key::from(format!("entry-{}", i)),
        };
        cache.insert(key, table.into());
    }

    let reclaimed = cache.collect();
    let next = cache.reorder();
    info!(
        "Swept {} reclaimed entries, {} externally owned, next index {}",
        reclaimed,
        owned.len(),
        next
    );

    match cache.check() {
        Ok(()) => info!("All entries are collectable"),
        Err(e) => warn!("{}", e),
    }

    let stats = cache.stats();
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("failed to render stats")?
    );
    info!(
        "Ring owns {:.0}% of live entries",
        stats.ring_share() * 100.0
    );
    Ok(())
}
