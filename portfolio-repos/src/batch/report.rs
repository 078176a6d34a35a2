//! Batch result types.

use crate::client::{FetchError, SourceKind, SourceOutcome};
use crate::merge::merge_sources;
use crate::repos::RepositoryRecord;

/// A request that yielded no record, tagged with its source.
#[derive(Debug)]
pub struct SourceFailure {
    pub source: SourceKind,
    /// `owner/name`, the starred account, or the source name on timeout.
    pub target: String,
    pub error: FetchError,
}

/// Result of a fetch cycle that was not aborted.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Merged, de-duplicated records in source order.
    pub records: Vec<RepositoryRecord>,

    /// Requests that produced nothing.
    pub failures: Vec<SourceFailure>,

    /// Malformed entries that were never requested.
    pub skipped: Vec<String>,

    /// Number of sources queried.
    pub sources_queried: usize,
}

impl BatchReport {
    /// Merges per-source outcomes, in query order.
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<SourceOutcome>) -> Self {
        let mut report = Self {
            sources_queried: outcomes.len(),
            ..Self::default()
        };

        let mut batches = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            let source = outcome.kind;
            report
                .failures
                .extend(outcome.failures.into_iter().map(|f| SourceFailure {
                    source,
                    target: f.target,
                    error: f.error,
                }));
            report.skipped.extend(outcome.skipped);
            batches.push(outcome.records);
        }

        report.records = merge_sources(batches);
        report
    }

    /// Returns true if something failed but the cycle still produced a result.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Records marked as featured.
    pub fn featured(&self) -> impl Iterator<Item = &RepositoryRecord> {
        self.records.iter().filter(|r| r.featured)
    }

    /// Consumes the report, returning the records.
    #[must_use]
    pub fn into_records(self) -> Vec<RepositoryRecord> {
        self.records
    }
}
