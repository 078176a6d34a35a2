//! Fetch error types and status classification.

use crate::http::TransportError;
use thiserror::Error;

/// Classification of a completed exchange that carried an error status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 404.
    NotFound,
    /// 401.
    AuthFailure,
    /// 403: rate limit exceeded or access forbidden.
    RateLimited,
    /// Any other non-success status.
    Other(u16),
}

impl ApiErrorKind {
    /// Classifies a non-success status code.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            401 => Self::AuthFailure,
            403 => Self::RateLimited,
            other => Self::Other(other),
        }
    }

    /// Short category used in log lines.
    #[must_use]
    pub fn category(self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::AuthFailure => "auth",
            Self::RateLimited => "rate-limit",
            Self::Other(_) => "other",
        }
    }

    /// Operator-facing hint for the failure.
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::NotFound => "Not found",
            Self::AuthFailure => {
                "GitHub API authentication failed. Check your Personal Access Token."
            }
            Self::RateLimited => {
                "GitHub API rate limit exceeded or access forbidden. Check your token permissions."
            }
            Self::Other(_) => "GitHub API error",
        }
    }
}

/// Errors for a single request against the API.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The API answered with an error status.
    #[error("GitHub API error {status} ({})", .kind.category())]
    Api { status: u16, kind: ApiErrorKind },

    /// The exchange could not be completed, even after retrying.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API answered 2xx with a body we could not read.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Short category used in log lines.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Api { kind, .. } => kind.category(),
            Self::Transport(e) if e.is_network() => "network",
            Self::Transport(_) => "invalid-request",
            Self::Decode { .. } => "other",
        }
    }

    /// Returns the transport error if this failure never reached the API.
    #[must_use]
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(error) => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_transport(&self) -> bool {
        self.as_transport().is_some()
    }
}

/// Errors building a [`RepositoryFetchClient`](super::RepositoryFetchClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API base URL is unusable.
    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
