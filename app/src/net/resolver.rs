//! Direct-then-relay resolution of JSON resources.

use std::rc::Rc;

use serde_json::Value;

use super::error::{ApiError, AttemptFailure};
use super::fetch::Fetch;
use super::proxy::ProxyRewriter;
use crate::cache::ResponseCache;

/// Which attempts a resource is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Only the direct request (the upstream allows cross-origin reads).
    DirectOnly,
    /// Direct request first, then every relay in order.
    WithProxies,
}

/// One step of the attempt pipeline.
#[derive(Debug, Clone, Copy)]
enum Strategy<'a> {
    Direct,
    Relay(&'a ProxyRewriter),
}

impl Strategy<'_> {
    fn label(&self) -> &str {
        match self {
            Self::Direct => "direct",
            Self::Relay(relay) => relay.name(),
        }
    }

    fn target(&self, url: &str) -> String {
        match self {
            Self::Direct => url.to_string(),
            Self::Relay(relay) => relay.rewrite(url),
        }
    }
}

/// Resolves a logical resource URL to its JSON payload.
///
/// Consults the shared [`ResponseCache`] first, then tries the direct URL and
/// each relay in order, stopping at the first attempt that yields a success
/// status with a parseable body. Successful payloads are cached under the
/// original URL whichever attempt produced them.
pub struct NetworkResolver {
    fetcher: Box<dyn Fetch>,
    proxies: Vec<ProxyRewriter>,
    cache: Rc<ResponseCache>,
}

impl NetworkResolver {
    pub fn new(
        fetcher: impl Fetch + 'static,
        proxies: Vec<ProxyRewriter>,
        cache: Rc<ResponseCache>,
    ) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            proxies,
            cache,
        }
    }

    #[must_use]
    pub fn proxies(&self) -> &[ProxyRewriter] {
        &self.proxies
    }

    /// Resolve `url` using the direct request and then the relays.
    ///
    /// # Errors
    /// Returns [`ApiError::NetworkExhausted`] when every attempt fails.
    pub async fn resolve(&self, url: &str) -> Result<Rc<Value>, ApiError> {
        self.resolve_with(url, FetchPolicy::WithProxies).await
    }

    /// Resolve `url` with an explicit [`FetchPolicy`].
    ///
    /// # Errors
    /// Returns [`ApiError::NetworkExhausted`] when every permitted attempt fails.
    pub async fn resolve_with(
        &self,
        url: &str,
        policy: FetchPolicy,
    ) -> Result<Rc<Value>, ApiError> {
        if let Some(hit) = self.cache.get(url) {
            tracing::debug!(url, "cache hit");
            return Ok(hit);
        }

        let mut failures = Vec::new();
        for strategy in self.strategies(policy) {
            let target = strategy.target(url);
            tracing::debug!(url, via = strategy.label(), "fetch attempt");

            match self.fetcher.get_json(&target).await {
                Ok(payload) => {
                    if !failures.is_empty() {
                        tracing::info!(url, via = strategy.label(), "resolved after fallback");
                    }
                    return Ok(self.cache.put(url, payload));
                }
                Err(error) => {
                    tracing::warn!(url, via = strategy.label(), %error, "fetch attempt failed");
                    failures.push(AttemptFailure {
                        via: strategy.label().to_string(),
                        target,
                        error,
                    });
                }
            }
        }

        tracing::warn!(url, attempts = failures.len(), "all sources failed");
        Err(ApiError::NetworkExhausted {
            url: url.to_string(),
            failures,
        })
    }

    fn strategies(&self, policy: FetchPolicy) -> Vec<Strategy<'_>> {
        let mut strategies = vec![Strategy::Direct];
        if policy == FetchPolicy::WithProxies {
            strategies.extend(self.proxies.iter().map(Strategy::Relay));
        }
        strategies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::error::AttemptError;
    use crate::net::mock::StubFetcher;
    use serde_json::json;
    use std::time::Duration;

    fn relays() -> Vec<ProxyRewriter> {
        vec![
            ProxyRewriter::from_template("https://relay-a.test/?u={url}"),
            ProxyRewriter::from_template("https://relay-b.test/?u={url}"),
        ]
    }

    fn cache() -> Rc<ResponseCache> {
        Rc::new(ResponseCache::new(Duration::from_secs(600)))
    }

    #[tokio::test]
    async fn test_direct_failure_falls_back_to_relay() {
        let fetcher = Rc::new(StubFetcher::new(|url| {
            if url.starts_with("https://relay-a.test/") {
                Ok(json!({"via": "relay"}))
            } else {
                Err(AttemptError::Transport("blocked by CORS".into()))
            }
        }));
        let resolver = NetworkResolver::new(Rc::clone(&fetcher), relays(), cache());

        let payload = resolver.resolve("https://up.test/x").await.expect("resolves");

        assert_eq!(*payload, json!({"via": "relay"}));
        assert_eq!(fetcher.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_reports_every_attempt() {
        let fetcher = StubFetcher::new(|_| Err(AttemptError::HttpStatus { status: 503 }));
        let resolver = NetworkResolver::new(fetcher, relays(), cache());

        let err = resolver
            .resolve("https://up.test/x")
            .await
            .expect_err("everything fails");

        let ApiError::NetworkExhausted { url, failures } = err;
        assert_eq!(url, "https://up.test/x");
        let via: Vec<_> = failures.iter().map(|f| f.via.as_str()).collect();
        assert_eq!(via, vec!["direct", "relay-a.test", "relay-b.test"]);
    }

    #[tokio::test]
    async fn test_direct_only_skips_relays() {
        let fetcher = Rc::new(StubFetcher::new(|_| {
            Err(AttemptError::Parse("expected value".into()))
        }));
        let resolver = NetworkResolver::new(Rc::clone(&fetcher), relays(), cache());

        let result = resolver
            .resolve_with("https://up.test/x", FetchPolicy::DirectOnly)
            .await;

        assert!(result.is_err());
        assert_eq!(fetcher.calls(), vec!["https://up.test/x".to_string()]);
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let fetcher = Rc::new(StubFetcher::new(|_| Ok(json!([1]))));
        let resolver = NetworkResolver::new(Rc::clone(&fetcher), relays(), cache());

        resolver.resolve("https://up.test/x").await.expect("first");
        resolver.resolve("https://up.test/x").await.expect("second");

        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_relay_payload_cached_under_original_url() {
        let shared = cache();
        let fetcher = StubFetcher::new(|url| {
            if url.starts_with("https://relay-b.test/") {
                Ok(json!("b"))
            } else {
                Err(AttemptError::HttpStatus { status: 429 })
            }
        });
        let resolver = NetworkResolver::new(fetcher, relays(), Rc::clone(&shared));

        resolver.resolve("https://up.test/y").await.expect("resolves");

        assert_eq!(*shared.get("https://up.test/y").expect("cached"), json!("b"));
        assert_eq!(shared.len(), 1);
    }
}
