//! Per-source fetch outcomes.

use super::FetchError;
use crate::http::TransportError;
use crate::repos::RepositoryRecord;
use serde::Serialize;
use std::fmt;

/// Which source a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// The account's starred repositories.
    Starred,
    /// The configured list of `owner/name` entries.
    Named,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Starred => "starred",
            Self::Named => "named",
        })
    }
}

/// A single entry (or the whole starred listing) that produced no record.
#[derive(Debug)]
pub struct EntryFailure {
    /// `owner/name` for named entries, the account for the starred listing.
    pub target: String,
    pub error: FetchError,
}

/// Everything one source produced.
#[derive(Debug)]
pub struct SourceOutcome {
    pub kind: SourceKind,

    /// Normalized records in request order.
    pub records: Vec<RepositoryRecord>,

    /// Entries that were requested but yielded nothing.
    pub failures: Vec<EntryFailure>,

    /// Malformed entries that were never requested.
    pub skipped: Vec<String>,
}

impl SourceOutcome {
    /// Creates an empty outcome.
    #[must_use]
    pub fn new(kind: SourceKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Creates an outcome for a source that failed before producing anything.
    #[must_use]
    pub fn failed(kind: SourceKind, target: impl Into<String>, error: FetchError) -> Self {
        let mut outcome = Self::new(kind);
        outcome.failures.push(EntryFailure {
            target: target.into(),
            error,
        });
        outcome
    }

    /// Returns true if the source produced nothing and every request it made
    /// failed at the network level.
    #[must_use]
    pub fn is_network_failure(&self) -> bool {
        self.records.is_empty()
            && !self.failures.is_empty()
            && self.failures.iter().all(|f| {
                f.error
                    .as_transport()
                    .is_some_and(TransportError::is_network)
            })
    }

    /// Transport errors behind this source's failures.
    pub fn transport_errors(&self) -> impl Iterator<Item = &TransportError> {
        self.failures.iter().filter_map(|f| f.error.as_transport())
    }
}
