//! Real HTTP transport backed by reqwest.

use super::{HttpHeaders, HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::time::Duration;

/// A transport that performs real network requests.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wraps an existing client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client, optionally with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Setup`] if the TLS backend cannot be initialized.
    pub fn build(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TransportError::Setup {
            message: e.to_string(),
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| classify_error(&request.url, e))?;

        let status = response.status().as_u16();
        let headers: HttpHeaders = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| classify_error(&request.url, e))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify_error(url: &str, error: reqwest::Error) -> TransportError {
    let target = url.to_string();
    if error.is_timeout() {
        TransportError::TimedOut { target }
    } else if error.is_builder() || error.is_redirect() {
        TransportError::InvalidRequest {
            target,
            message: error.to_string(),
        }
    } else if error.is_connect() {
        TransportError::Connect {
            target,
            message: error.to_string(),
        }
    } else {
        TransportError::Interrupted {
            target,
            message: error.to_string(),
        }
    }
}
