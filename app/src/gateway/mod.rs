//! Resource gateway for French parliamentary data.
//!
//! Two upstream providers are reconciled into one record shape:
//!
//! - an open-data catalog with flat, paginated per-person records (member lists)
//! - the chamber hosts, with `{depute: ...}` / `{senateur: ...}` envelopes
//!   (detail, vote history, roll calls, groups)
//!
//! # Architecture
//!
//! - [`ParliamentApi`] - Trait defining the read operations
//! - [`Gateway`] - Upstream implementation over [`crate::net::NetworkResolver`]
//! - [`LegislatorAdapter`] - One raw-record mapping per provider
//! - [`mock::MockParliamentApi`] - Mock for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! ```ignore
//! use parlvotes::gateway::mock::MockParliamentApi;
//!
//! let mock = MockParliamentApi::new();
//! mock.set_votes(Ok(vec![]));
//! let votes = mock.get_votes(Chamber::Assemblee, "marie-dupont").await?;
//! assert_eq!(mock.calls(), vec!["get_votes:Assemblee:marie-dupont"]);
//! ```

mod adapters;
mod classify;
mod client;
mod normalize;
mod types;

pub use adapters::{LegislatorAdapter, NosParlementairesAdapter, OpenDataAdapter};
pub use classify::OutcomeClassifier;
pub use client::{Gateway, ParliamentApi};
pub use types::{
    Chamber, GroupVoteBlock, LegislatorRecord, MemberRef, Outcome, ParliamentaryGroup, Position,
    RollCall, SourceTag, VoteCounts, VoteRecord, VoteShares, VoteStats,
};

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock;
