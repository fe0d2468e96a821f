//! Route table and dispatcher.
//!
//! - [`RoutePattern`] - `/literal/:param` patterns, matched in registration order
//! - [`Router`] - Idle/Mounted state machine driven by navigation targets
//! - [`ViewGuard`] - generation check for async completions
//! - [`Shell`] - page chrome (nav links, not-found, scroll, mobile menu)

mod dispatcher;
mod pattern;
mod shell;
mod target;

pub use dispatcher::{
    Dispatch, Generation, Handler, RouteError, RouteParams, Router, Teardown, ViewGuard,
};
pub use pattern::RoutePattern;
pub use shell::Shell;
pub use target::{is_link_active, path_of, query_of};

#[cfg(any(test, feature = "test-utils"))]
#[allow(clippy::must_use_candidate)]
pub mod mock;
