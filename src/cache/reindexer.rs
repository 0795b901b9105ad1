//! Reindexer Module
//!
//! Compacts a sparse, number-keyed store back into a gapless `1..=n` sequence.

use crate::cache::Table;
use crate::value::Value;

/// Renumbers every live number-keyed entry of `store` to `1..=n`, keeping
/// their relative order. Other keys are left alone.
///
/// Returns the first unused index, `n + 1`.
pub fn reindex(store: &Table) -> usize {
    store.sweep();

    let mut numbered: Vec<(f64, Value)> = store
        .iter()
        .filter_map(|(key, value)| key.as_number().map(|n| (n, value)))
        .collect();
    // Stable, so equal keys cannot swap.
    numbered.sort_by(|a, b| a.0.total_cmp(&b.0));

    // `numbered` owns every value while its entry is detached.
    for (n, _) in &numbered {
        store.remove(*n);
    }
    let next = numbered.len() + 1;
    for (i, (_, value)) in numbered.into_iter().enumerate() {
        store.set(i + 1, value);
    }
    next
}
