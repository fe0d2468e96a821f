//! Network access with cross-origin fallback.
//!
//! - [`Fetch`] - one GET of a JSON document; [`HttpFetcher`] wraps reqwest
//! - [`ProxyRewriter`] - maps a target URL onto a CORS relay
//! - [`NetworkResolver`] - cache, then direct fetch, then relays in order
//! - [`mock::StubFetcher`] - scripted fetcher (behind `test-utils`)

mod error;
mod fetch;
mod proxy;
mod resolver;

pub use error::{ApiError, AttemptError, AttemptFailure};
pub use fetch::{Fetch, HttpFetcher};
pub use proxy::ProxyRewriter;
pub use resolver::{FetchPolicy, NetworkResolver};

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn
)]
pub mod mock;
