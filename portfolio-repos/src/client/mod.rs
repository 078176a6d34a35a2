//! Repository fetch client for the GitHub REST API.
//!
//! Two fetch shapes are supported: a list of named `owner/name` entries, each
//! fetched individually, and the starred listing of one account. Both
//! normalize into [`RepositoryRecord`] and contain their own failures: a
//! failed entry or listing is logged and yields no records rather than an
//! error.

mod error;
mod outcome;

pub use error::{ApiErrorKind, ClientError, FetchError};
pub use outcome::{EntryFailure, SourceKind, SourceOutcome};

use crate::config::{is_active_account, usable_credential};
use crate::http::{fetch_with_retry, HttpRequest, HttpTransport, RetryPolicy};
use crate::repos::{ApiRepository, RepoName, RepositoryRecord};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};
use url::Url;

/// Default API root.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Media type requested from the API.
pub const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

const USER_AGENT: &str = concat!("portfolio-repos/", env!("CARGO_PKG_VERSION"));

/// Fetches and normalizes repositories.
#[derive(Clone)]
pub struct RepositoryFetchClient {
    transport: Arc<dyn HttpTransport>,
    base_url: Url,
    retry: RetryPolicy,
}

impl RepositoryFetchClient {
    /// Creates a client against `base_url` with the default retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL that can carry a path.
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: &str) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }

        Ok(Self {
            transport,
            base_url: parsed,
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Fetches each `owner/name` entry concurrently.
    ///
    /// Malformed entries and failed requests are logged and left out. The
    /// result keeps request order.
    pub async fn fetch_named(
        &self,
        named_repos: &[String],
        credential: Option<&str>,
        featured_set: &HashSet<String>,
    ) -> Vec<RepositoryRecord> {
        self.fetch_named_outcome(named_repos, credential, featured_set)
            .await
            .records
    }

    /// Like [`fetch_named`](Self::fetch_named) but also reports failures.
    pub async fn fetch_named_outcome(
        &self,
        named_repos: &[String],
        credential: Option<&str>,
        featured_set: &HashSet<String>,
    ) -> SourceOutcome {
        let span = info_span!("fetch_named", entries = named_repos.len());

        async {
            let mut outcome = SourceOutcome::new(SourceKind::Named);

            let mut names = Vec::with_capacity(named_repos.len());
            for entry in named_repos {
                match RepoName::parse(entry) {
                    Ok(name) => names.push(name),
                    Err(e) => {
                        warn!(entry = %entry, error = %e, "Skipping malformed repository entry");
                        outcome.skipped.push(entry.clone());
                    }
                }
            }

            let results = join_all(names.iter().map(|name| self.fetch_repo(name, credential))).await;

            for (name, result) in names.into_iter().zip(results) {
                let full_name = name.full_name();
                match result {
                    Ok(repo) => outcome
                        .records
                        .push(RepositoryRecord::from_api(repo, full_name, featured_set)),
                    Err(error) => {
                        warn!(
                            repo = %full_name,
                            category = error.category(),
                            error = %error,
                            "Failed to fetch repository"
                        );
                        outcome.failures.push(EntryFailure {
                            target: full_name,
                            error,
                        });
                    }
                }
            }

            info!(
                fetched = outcome.records.len(),
                failed = outcome.failures.len(),
                skipped = outcome.skipped.len(),
                "Named fetch complete"
            );
            outcome
        }
        .instrument(span)
        .await
    }

    /// Lists the repositories `account` has starred, most recently updated
    /// first, up to `max_count`.
    ///
    /// An empty or placeholder account is a no-op. A failed listing is
    /// logged with its classification and yields an empty result.
    pub async fn fetch_starred(
        &self,
        account: &str,
        credential: Option<&str>,
        max_count: u32,
        featured_set: &HashSet<String>,
    ) -> Vec<RepositoryRecord> {
        self.fetch_starred_outcome(account, credential, max_count, featured_set)
            .await
            .records
    }

    /// Like [`fetch_starred`](Self::fetch_starred) but also reports failures.
    pub async fn fetch_starred_outcome(
        &self,
        account: &str,
        credential: Option<&str>,
        max_count: u32,
        featured_set: &HashSet<String>,
    ) -> SourceOutcome {
        if !is_active_account(account) {
            debug!("Starred account not configured, skipping");
            return SourceOutcome::new(SourceKind::Starred);
        }
        let account = account.trim();
        let span = info_span!("fetch_starred", account = %account, max_count);

        async {
            let mut outcome = SourceOutcome::new(SourceKind::Starred);
            match self.list_starred(account, credential, max_count).await {
                Ok(repos) => {
                    for repo in repos {
                        match repo.full_name() {
                            Some(full_name) => outcome.records.push(RepositoryRecord::from_api(
                                repo,
                                full_name,
                                featured_set,
                            )),
                            None => warn!(id = repo.id, "Skipping starred repository without owner"),
                        }
                    }
                    info!(fetched = outcome.records.len(), "Starred fetch complete");
                }
                Err(error) => {
                    warn!(
                        category = starred_category(&error),
                        error = %error,
                        "Failed to fetch starred repositories"
                    );
                    outcome.failures.push(EntryFailure {
                        target: account.to_string(),
                        error,
                    });
                }
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn fetch_repo(
        &self,
        name: &RepoName,
        credential: Option<&str>,
    ) -> Result<ApiRepository, FetchError> {
        let url = self.endpoint(&["repos", name.owner(), name.name()]);
        self.get_json(&url, credential).await
    }

    async fn list_starred(
        &self,
        account: &str,
        credential: Option<&str>,
        max_count: u32,
    ) -> Result<Vec<ApiRepository>, FetchError> {
        let mut url = self.endpoint(&["users", account, "starred"]);
        url.query_pairs_mut()
            .append_pair("per_page", &max_count.to_string())
            .append_pair("sort", "updated");
        self.get_json(&url, credential).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        credential: Option<&str>,
    ) -> Result<T, FetchError> {
        let request = build_request(url, credential);
        let response = fetch_with_retry(self.transport.as_ref(), &request, &self.retry).await?;

        if !response.is_success() {
            let kind = ApiErrorKind::from_status(response.status);
            debug!(url = %url, status = response.status, hint = kind.hint(), "API returned error status");
            return Err(FetchError::Api {
                status: response.status,
                kind,
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Builds a GET with the API media type and, when usable, the token.
fn build_request(url: &Url, credential: Option<&str>) -> HttpRequest {
    let request = HttpRequest::get(url.as_str())
        .with_header("Accept", ACCEPT_MEDIA_TYPE)
        .with_header("User-Agent", USER_AGENT);

    match usable_credential(credential) {
        Some(token) => request.with_header("Authorization", format!("token {token}")),
        None => request,
    }
}

/// Log category for a failed starred listing; a 404 means the account.
fn starred_category(error: &FetchError) -> &'static str {
    match error {
        FetchError::Api {
            kind: ApiErrorKind::NotFound,
            ..
        } => "account-not-found",
        other => other.category(),
    }
}
