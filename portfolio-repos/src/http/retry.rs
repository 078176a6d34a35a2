//! Retry with exponential backoff for network failures.
//!
//! Only refused, cut-off or timed-out exchanges are retried. A response
//! carrying an error status, or a request that could not be built, is handed
//! back after a single attempt.

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use backon::{ExponentialBuilder, Retryable};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Additional attempts made after the first transport failure.
pub const DEFAULT_RETRIES: u32 = 2;

/// Delay before the first retry; doubled for each later one.
const BASE_DELAY: Duration = Duration::from_secs(1);

/// How many times to retry and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first (total attempts = `retries + 1`).
    pub retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            base_delay: BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the default one-second base delay.
    #[must_use]
    pub fn new(retries: u32) -> Self {
        Self {
            retries,
            ..Self::default()
        }
    }

    /// Builds the backoff: `base_delay * 2^attempt`, no jitter, no cap.
    #[must_use]
    pub fn into_backoff(self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_factor(2.0)
            .without_max_delay()
            .with_max_times(self.retries as usize)
    }
}

/// Sends `request`, retrying network failures per `policy`.
///
/// # Errors
///
/// Returns the last [`TransportError`] once `policy.retries + 1` attempts
/// have all failed, or the first error that retrying cannot fix.
pub async fn fetch_with_retry(
    transport: &dyn HttpTransport,
    request: &HttpRequest,
    policy: &RetryPolicy,
) -> Result<HttpResponse, TransportError> {
    let attempts = AtomicU32::new(0);

    let send = || {
        attempts.fetch_add(1, Ordering::SeqCst);
        transport.send(request)
    };

    let result = send
        .retry(policy.into_backoff())
        .when(TransportError::is_retryable)
        .notify(|error, delay| {
            warn!(
                url = %request.url,
                attempt = attempts.load(Ordering::SeqCst),
                delay_secs = delay.as_secs(),
                error = %error,
                "Transport failure, retrying"
            );
        })
        .await;

    let made = attempts.load(Ordering::SeqCst);
    if result.is_ok() && made > 1 {
        debug!(url = %request.url, attempts = made, "Request recovered after retry");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::{MockReply, MockTransport};

    const URL: &str = "https://api.test/repos/acme/widget";

    #[tokio::test(start_paused = true)]
    async fn delays_double_per_attempt() {
        let transport = MockTransport::new();
        for _ in 0..4 {
            transport.push_connect_failure(URL);
        }

        let start = tokio::time::Instant::now();
        let result =
            fetch_with_retry(&transport, &HttpRequest::get(URL), &RetryPolicy::new(3)).await;

        assert!(result.is_err());
        assert_eq!(transport.request_count(URL), 4);
        // 1s + 2s + 4s
        assert_eq!(start.elapsed(), Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_from_transient_failure() {
        let transport = MockTransport::new();
        transport.push_connect_failure(URL);
        transport.push_json(URL, 200, serde_json::json!({"ok": true}));

        let response = fetch_with_retry(&transport, &HttpRequest::get(URL), &RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(transport.request_count(URL), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_retries_plus_one_attempts() {
        let transport = MockTransport::new();
        for _ in 0..5 {
            transport.push_connect_failure(URL);
        }

        let start = tokio::time::Instant::now();
        let error = fetch_with_retry(&transport, &HttpRequest::get(URL), &RetryPolicy::new(2))
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::Connect { .. }));
        assert_eq!(transport.request_count(URL), 3);
        // 1s + 2s of backoff on the paused clock
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_makes_one_attempt() {
        let transport = MockTransport::new();
        transport.push_connect_failure(URL);
        transport.push_json(URL, 200, serde_json::json!({}));

        let result =
            fetch_with_retry(&transport, &HttpRequest::get(URL), &RetryPolicy::new(0)).await;

        assert!(result.is_err());
        assert_eq!(transport.request_count(URL), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn error_statuses_are_not_retried() {
        for status in [404, 401, 403, 500] {
            let transport = MockTransport::new();
            transport.push_status(URL, status);
            transport.push_json(URL, 200, serde_json::json!({}));

            let response =
                fetch_with_retry(&transport, &HttpRequest::get(URL), &RetryPolicy::default())
                    .await
                    .unwrap();

            assert_eq!(response.status, status);
            assert_eq!(transport.request_count(URL), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn interrupted_exchange_is_retried_too() {
        let transport = MockTransport::new();
        transport.push(
            URL,
            MockReply::Fail(TransportError::Interrupted {
                target: URL.to_string(),
                message: "network changed".to_string(),
            }),
        );
        transport.push_json(URL, 200, serde_json::json!({}));

        let response = fetch_with_retry(&transport, &HttpRequest::get(URL), &RetryPolicy::default())
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_request_is_not_retried() {
        let transport = MockTransport::new();
        transport.push(
            URL,
            MockReply::Fail(TransportError::InvalidRequest {
                target: URL.to_string(),
                message: "builder error".to_string(),
            }),
        );
        transport.push_json(URL, 200, serde_json::json!({}));

        let error = fetch_with_retry(&transport, &HttpRequest::get(URL), &RetryPolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(error, TransportError::InvalidRequest { .. }));
        assert_eq!(transport.request_count(URL), 1);
    }
}
