//! Transport error types.

use thiserror::Error;

/// A failure to complete an HTTP exchange at all.
///
/// A response that arrived with an error status is *not* a transport error;
/// those are returned to the caller as an [`HttpResponse`](super::HttpResponse)
/// for status classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection could not be established (DNS, refused, offline).
    #[error("Unable to connect to {target}: {message}")]
    Connect { target: String, message: String },

    /// The exchange started but was cut off (reset, network change).
    #[error("Connection interrupted while requesting {target}: {message}")]
    Interrupted { target: String, message: String },

    /// No response arrived in time.
    #[error("Request to {target} timed out")]
    TimedOut { target: String },

    /// The request could not be built (e.g. a header value with a newline).
    /// Sending it again cannot help.
    #[error("Invalid request to {target}: {message}")]
    InvalidRequest { target: String, message: String },

    /// The HTTP client itself could not be built.
    #[error("Failed to set up HTTP client: {message}")]
    Setup { message: String },
}

impl TransportError {
    /// Returns true if the failure looks like the network changed mid-request
    /// rather than being unreachable.
    #[must_use]
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }

    /// Returns true if the network itself failed: refused, cut off or
    /// timed out.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Connect { .. } | Self::Interrupted { .. } | Self::TimedOut { .. }
        )
    }

    /// Returns true if another attempt might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.is_network()
    }
}
