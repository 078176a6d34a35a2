//! Merging of per-source results.

use crate::repos::RepositoryRecord;
use std::collections::HashSet;

/// Concatenates `sources` in order, keeping only the first record seen for
/// each [`dedup_key`](RepositoryRecord::dedup_key).
///
/// Later duplicates are dropped whole; fields are never combined.
pub fn merge_sources<I>(sources: I) -> Vec<RepositoryRecord>
where
    I: IntoIterator<Item = Vec<RepositoryRecord>>,
{
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for record in sources.into_iter().flatten() {
        if seen.insert(record.dedup_key().into_owned()) {
            merged.push(record);
        }
    }

    merged
}
