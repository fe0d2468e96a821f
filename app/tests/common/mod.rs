//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - declarative `wiremock` stubs for the
//!   reqwest-backed fetcher

pub mod http_mock;
