#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Read-only browser of French parliamentary votes.
//!
//! Upstream JSON is resolved through a cached direct-then-relay pipeline
//! ([`net`]), normalized into uniform records ([`gateway`]), and rendered by
//! views mounted from a hash-style route table ([`router`], [`views`]).
//! Everything runs on one cooperative thread.

pub mod cache;
pub mod config;
pub mod gateway;
pub mod net;
pub mod router;
pub mod views;
