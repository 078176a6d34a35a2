//! One fetch-merge cycle over every configured source.

mod error;
mod report;

pub use error::{BatchError, ErrorAffordance};
pub use report::{BatchReport, SourceFailure};

use crate::client::{FetchError, RepositoryFetchClient, SourceKind, SourceOutcome};
use crate::config::FetchConfiguration;
use crate::http::TransportError;
use futures::future::{join_all, BoxFuture, FutureExt};
use std::time::Duration;
use tracing::{error, info, info_span, warn, Instrument};

/// Queries every configured source concurrently and merges the results.
///
/// Sources are queried starred-first, then named; on duplicate `owner/name`
/// the starred record is kept. Every source runs to completion (or its
/// timeout) before merging.
///
/// # Errors
///
/// - [`BatchError::NoSourcesConfigured`] if there is nothing to query; no
///   request is made.
/// - [`BatchError::NetworkChanged`] / [`BatchError::NetworkUnreachable`] if
///   every source failed at the transport level.
///
/// Any other failure is contained and listed in [`BatchReport::failures`].
pub async fn fetch_all(
    client: &RepositoryFetchClient,
    config: &FetchConfiguration,
) -> Result<BatchReport, BatchError> {
    let span = info_span!("fetch_all");

    async {
        if !config.has_sources() {
            let error = BatchError::NoSourcesConfigured;
            warn!(category = error.category(), "No repository sources configured");
            return Err(error);
        }

        let credential = config.credential();
        let mut sources: Vec<(SourceKind, BoxFuture<'_, SourceOutcome>)> = Vec::new();

        if let Some(account) = config.active_starred_account() {
            sources.push((
                SourceKind::Starred,
                client
                    .fetch_starred_outcome(
                        account,
                        credential,
                        config.max_starred,
                        &config.featured_set,
                    )
                    .boxed(),
            ));
        }

        if !config.named_repos.is_empty() {
            sources.push((
                SourceKind::Named,
                client
                    .fetch_named_outcome(&config.named_repos, credential, &config.featured_set)
                    .boxed(),
            ));
        }

        info!(
            sources = sources.len(),
            authenticated = credential.is_some(),
            "Fetching repositories"
        );

        let outcomes = join_all(
            sources
                .into_iter()
                .map(|(kind, task)| settle(kind, task, config.source_timeout)),
        )
        .await;

        if let Some(error) = classify_total_failure(&outcomes) {
            error!(category = error.category(), "Every repository source failed");
            return Err(error);
        }

        let report = BatchReport::from_outcomes(outcomes);
        info!(
            records = report.records.len(),
            failures = report.failures.len(),
            skipped = report.skipped.len(),
            "Fetch complete"
        );
        Ok(report)
    }
    .instrument(span)
    .await
}

/// Awaits one source, bounded by `timeout` when set.
async fn settle(
    kind: SourceKind,
    task: BoxFuture<'_, SourceOutcome>,
    timeout: Option<Duration>,
) -> SourceOutcome {
    let Some(limit) = timeout else {
        return task.await;
    };

    match tokio::time::timeout(limit, task).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(source = %kind, timeout_secs = limit.as_secs(), "Source timed out");
            let target = format!("{kind} source");
            SourceOutcome::failed(
                kind,
                target.clone(),
                FetchError::Transport(TransportError::TimedOut { target }),
            )
        }
    }
}

/// Returns the batch error if every source failed at the network level.
///
/// The failure reads as a network change only if every exchange was cut off
/// mid-flight; anything else (refused, offline, timed out) is unreachable.
fn classify_total_failure(outcomes: &[SourceOutcome]) -> Option<BatchError> {
    if outcomes.is_empty() || !outcomes.iter().all(SourceOutcome::is_network_failure) {
        return None;
    }

    let all_interrupted = outcomes
        .iter()
        .flat_map(SourceOutcome::transport_errors)
        .all(TransportError::is_interrupted);

    Some(if all_interrupted {
        BatchError::NetworkChanged
    } else {
        BatchError::NetworkUnreachable
    })
}
