//! Mock implementation for unit testing.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use futures::channel::oneshot;

use super::client::ParliamentApi;
use super::types::{Chamber, LegislatorRecord, ParliamentaryGroup, RollCall, VoteRecord};
use crate::net::ApiError;

type Slot<T> = RefCell<Option<Result<T, ApiError>>>;

fn exhausted(url: &str) -> ApiError {
    ApiError::NetworkExhausted {
        url: url.to_string(),
        failures: Vec::new(),
    }
}

/// Mock implementation of [`ParliamentApi`] for unit tests.
///
/// Configure responses with `set_*` methods; results are returned on every
/// call until replaced. Unset list operations return an empty list, unset
/// single-record operations fail with `NetworkExhausted`. Verify calls with
/// [`calls`](Self::calls).
///
/// [`hold`](Self::hold) keeps one call pending until its sender fires, which
/// lets tests observe which other calls were issued in the meantime.
#[derive(Default)]
pub struct MockParliamentApi {
    legislators: Slot<Vec<LegislatorRecord>>,
    chamber_legislators: RefCell<HashMap<Chamber, Result<Vec<LegislatorRecord>, ApiError>>>,
    legislator: Slot<LegislatorRecord>,
    votes: Slot<Vec<VoteRecord>>,
    roll_calls: Slot<Vec<RollCall>>,
    roll_call: Slot<RollCall>,
    groups: Slot<Vec<ParliamentaryGroup>>,
    calls: RefCell<Vec<String>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,
}

impl MockParliamentApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_legislators(&self, result: Result<Vec<LegislatorRecord>, ApiError>) {
        *self.legislators.borrow_mut() = Some(result);
    }

    /// Listing result for one chamber only; takes precedence over
    /// [`set_legislators`](Self::set_legislators).
    pub fn set_chamber_legislators(
        &self,
        chamber: Chamber,
        result: Result<Vec<LegislatorRecord>, ApiError>,
    ) {
        self.chamber_legislators.borrow_mut().insert(chamber, result);
    }

    pub fn set_legislator(&self, result: Result<LegislatorRecord, ApiError>) {
        *self.legislator.borrow_mut() = Some(result);
    }

    pub fn set_votes(&self, result: Result<Vec<VoteRecord>, ApiError>) {
        *self.votes.borrow_mut() = Some(result);
    }

    pub fn set_roll_calls(&self, result: Result<Vec<RollCall>, ApiError>) {
        *self.roll_calls.borrow_mut() = Some(result);
    }

    pub fn set_roll_call(&self, result: Result<RollCall, ApiError>) {
        *self.roll_call.borrow_mut() = Some(result);
    }

    pub fn set_groups(&self, result: Result<Vec<ParliamentaryGroup>, ApiError>) {
        *self.groups.borrow_mut() = Some(result);
    }

    /// Every operation invoked so far, as `"op:args"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Keep the next call recorded as `call` (e.g. `"list_legislators:Assemblee"`)
    /// pending until the returned sender fires or is dropped.
    pub fn hold(&self, call: &str) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.gates.borrow_mut().insert(call.to_string(), gate);
        release
    }

    async fn record(&self, call: String) {
        let gate = self.gates.borrow_mut().remove(&call);
        self.calls.borrow_mut().push(call);
        if let Some(gate) = gate {
            gate.await.ok();
        }
    }
}

fn list_or_empty<T: Clone>(slot: &Slot<Vec<T>>) -> Result<Vec<T>, ApiError> {
    slot.borrow().clone().unwrap_or_else(|| Ok(Vec::new()))
}

fn one_or_exhausted<T: Clone>(slot: &Slot<T>, url: &str) -> Result<T, ApiError> {
    slot.borrow().clone().unwrap_or_else(|| Err(exhausted(url)))
}

#[async_trait(?Send)]
impl ParliamentApi for MockParliamentApi {
    async fn list_legislators(
        &self,
        chamber: Chamber,
    ) -> Result<Vec<LegislatorRecord>, ApiError> {
        self.record(format!("list_legislators:{chamber:?}")).await;
        let for_chamber = self.chamber_legislators.borrow().get(&chamber).cloned();
        for_chamber.unwrap_or_else(|| list_or_empty(&self.legislators))
    }

    async fn get_legislator(
        &self,
        chamber: Chamber,
        slug: &str,
    ) -> Result<LegislatorRecord, ApiError> {
        self.record(format!("get_legislator:{chamber:?}:{slug}")).await;
        one_or_exhausted(&self.legislator, slug)
    }

    async fn get_votes(&self, chamber: Chamber, slug: &str) -> Result<Vec<VoteRecord>, ApiError> {
        self.record(format!("get_votes:{chamber:?}:{slug}")).await;
        list_or_empty(&self.votes)
    }

    async fn list_roll_calls(&self, chamber: Chamber) -> Result<Vec<RollCall>, ApiError> {
        self.record(format!("list_roll_calls:{chamber:?}")).await;
        list_or_empty(&self.roll_calls)
    }

    async fn get_roll_call(&self, chamber: Chamber, numero: &str) -> Result<RollCall, ApiError> {
        self.record(format!("get_roll_call:{chamber:?}:{numero}")).await;
        one_or_exhausted(&self.roll_call, numero)
    }

    async fn list_groups(&self) -> Result<Vec<ParliamentaryGroup>, ApiError> {
        self.record("list_groups".to_string()).await;
        list_or_empty(&self.groups)
    }

    fn photo_url(&self, chamber: Chamber, slug: &str) -> String {
        format!("https://photos.test/{}/{slug}", chamber.member_key())
    }
}
