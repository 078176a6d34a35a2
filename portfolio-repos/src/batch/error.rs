//! Batch-level error types.

use thiserror::Error;

const NO_SOURCES_MESSAGE: &str = "GitHub integration is enabled but no repositories are configured. \
Either enable fetch-starred-repos and set your username, or add repositories to selected-repos.";

const NETWORK_CHANGED_MESSAGE: &str = "Network connection issue. \
Please check your internet connection and try refreshing the page.";

const NETWORK_UNREACHABLE_MESSAGE: &str =
    "Unable to connect to GitHub API. Please check your internet connection.";

/// What the user can do about a batch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAffordance {
    /// Change the configuration, then reload.
    FixConfiguration,
    /// Nothing is wrong with the configuration; try again later.
    RetryPage,
}

/// Failures that abort a whole fetch cycle.
///
/// Failures of single entries or of one source among several are not
/// errors at this level; they are listed in the
/// [`BatchReport`](super::BatchReport).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BatchError {
    /// Neither a named list nor an active starred account was configured.
    #[error("{}", NO_SOURCES_MESSAGE)]
    NoSourcesConfigured,

    /// Every source failed to reach the API.
    #[error("{}", NETWORK_UNREACHABLE_MESSAGE)]
    NetworkUnreachable,

    /// Every source failed and every exchange was cut off mid-flight.
    #[error("{}", NETWORK_CHANGED_MESSAGE)]
    NetworkChanged,
}

impl BatchError {
    /// Message suitable for showing to the site visitor or operator.
    #[must_use]
    pub fn user_message(self) -> &'static str {
        match self {
            Self::NoSourcesConfigured => NO_SOURCES_MESSAGE,
            Self::NetworkUnreachable => NETWORK_UNREACHABLE_MESSAGE,
            Self::NetworkChanged => NETWORK_CHANGED_MESSAGE,
        }
    }

    #[must_use]
    pub fn affordance(self) -> ErrorAffordance {
        match self {
            Self::NoSourcesConfigured => ErrorAffordance::FixConfiguration,
            Self::NetworkUnreachable | Self::NetworkChanged => ErrorAffordance::RetryPage,
        }
    }

    /// Short category used in log lines.
    #[must_use]
    pub fn category(self) -> &'static str {
        match self {
            Self::NoSourcesConfigured => "no-sources-configured",
            Self::NetworkUnreachable => "network-unreachable",
            Self::NetworkChanged => "network-changed",
        }
    }
}
