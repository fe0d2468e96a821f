//! The HTTP fetch primitive.

use std::rc::Rc;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;

use super::error::AttemptError;

/// One GET of a JSON document.
///
/// Implementations make exactly one request and never retry; fallback is the
/// resolver's job. Futures are not `Send`: the pipeline runs on one thread.
#[async_trait(?Send)]
pub trait Fetch {
    /// Fetch `url` and parse its body as JSON.
    async fn get_json(&self, url: &str) -> Result<Value, AttemptError>;
}

#[async_trait(?Send)]
impl<T: Fetch + ?Sized> Fetch for Rc<T> {
    async fn get_json(&self, url: &str) -> Result<Value, AttemptError> {
        (**self).get_json(url).await
    }
}

/// `reqwest`-backed [`Fetch`].
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (custom timeouts, user agent, ...).
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl Fetch for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, AttemptError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AttemptError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| AttemptError::Parse(e.to_string()))
    }
}
