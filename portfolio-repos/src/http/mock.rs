//! In-memory transport for unit tests.

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// A scripted reply for one exchange.
#[derive(Debug, Clone)]
pub(crate) enum MockReply {
    Respond(HttpResponse),
    Fail(TransportError),
    /// Never completes; used to exercise timeouts.
    Hang,
}

#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    routes: HashMap<String, VecDeque<MockReply>>,
    requests: Vec<HttpRequest>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues a reply for a URL. Replies for the same URL are served FIFO.
    pub(crate) fn push(&self, url: impl Into<String>, reply: MockReply) {
        let mut inner = self.inner.lock().unwrap();
        inner.routes.entry(url.into()).or_default().push_back(reply);
    }

    pub(crate) fn push_json(&self, url: impl Into<String>, status: u16, body: serde_json::Value) {
        self.push(
            url,
            MockReply::Respond(HttpResponse {
                status,
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body: body.to_string().into_bytes(),
            }),
        );
    }

    pub(crate) fn push_status(&self, url: impl Into<String>, status: u16) {
        self.push_json(url, status, serde_json::json!({ "message": "error" }));
    }

    pub(crate) fn push_connect_failure(&self, url: impl Into<String>) {
        let url = url.into();
        self.push(
            url.clone(),
            MockReply::Fail(TransportError::Connect {
                target: url,
                message: "connection refused".to_string(),
            }),
        );
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub(crate) fn request_count(&self, url: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.url == url)
            .count()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let reply = {
            let mut inner = self.inner.lock().unwrap();
            inner.requests.push(request.clone());
            inner
                .routes
                .get_mut(&request.url)
                .and_then(VecDeque::pop_front)
        };

        match reply {
            Some(MockReply::Respond(response)) => Ok(response),
            Some(MockReply::Fail(error)) => Err(error),
            Some(MockReply::Hang) => std::future::pending().await,
            None => Err(TransportError::Connect {
                target: request.url.clone(),
                message: "no mock reply registered".to_string(),
            }),
        }
    }
}
