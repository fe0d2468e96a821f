//! Failure taxonomy for upstream access.

use thiserror::Error;

/// Why a single fetch attempt failed.
///
/// Attempt failures are recovered by the resolver's fallback chain and only
/// reach callers bundled inside [`ApiError::NetworkExhausted`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// Network, DNS, TLS or cross-origin failure before a response arrived.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status.
    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },

    /// The body was not valid JSON.
    #[error("malformed JSON body: {0}")]
    Parse(String),
}

/// One failed attempt against a concrete URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// `direct` or the relay's name.
    pub via: String,
    /// URL that was actually requested.
    pub target: String,
    pub error: AttemptError,
}

/// Errors surfaced by the resolver and every gateway operation.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The direct fetch and every relay failed.
    #[error("all sources failed for {url} ({attempts} attempts)", attempts = .failures.len())]
    NetworkExhausted {
        /// The originally requested URL.
        url: String,
        failures: Vec<AttemptFailure>,
    },
}

impl ApiError {
    /// URL whose resolution failed.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::NetworkExhausted { url, .. } => url,
        }
    }
}
