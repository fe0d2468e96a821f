//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! A thin wrapper around `wiremock` for declarative GET stubbing.
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//! server
//!     .expect_get("/depute/votes/json")
//!     .respond_with_json(json!({"votes": []}))
//!     .expect_times(1)
//!     .mount()
//!     .await;
//! ```

#![allow(dead_code)]

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct MockHttpServer {
    inner: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            inner: MockServer::start().await,
        }
    }

    /// Base URL, without trailing slash.
    pub fn url(&self) -> String {
        self.inner.uri()
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.inner.uri())
    }

    pub fn expect_get(&self, path: &str) -> GetStub<'_> {
        GetStub {
            server: &self.inner,
            path: path.to_string(),
            query: Vec::new(),
            response: ResponseTemplate::new(200),
            times: None,
        }
    }

    /// Number of requests received so far.
    pub async fn received_count(&self) -> usize {
        self.inner
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

/// A GET stub under construction.
pub struct GetStub<'a> {
    server: &'a MockServer,
    path: String,
    query: Vec<(String, String)>,
    response: ResponseTemplate,
    times: Option<u64>,
}

impl GetStub<'_> {
    /// Require a decoded query parameter.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn respond_with_json(mut self, body: Value) -> Self {
        self.response = ResponseTemplate::new(200).set_body_json(body);
        self
    }

    pub fn respond_with_body(mut self, body: &str) -> Self {
        self.response = ResponseTemplate::new(200).set_body_string(body);
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.response = ResponseTemplate::new(status);
        self
    }

    /// Verified when the server is dropped.
    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut builder = Mock::given(method("GET")).and(path(self.path.as_str()));
        for (key, value) in &self.query {
            builder = builder.and(query_param(key.as_str(), value.as_str()));
        }

        let mut mock = builder.respond_with(self.response);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}
