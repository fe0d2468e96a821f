//! Scripted fetcher for tests.

use std::cell::RefCell;

use async_trait::async_trait;
use serde_json::Value;

use super::error::AttemptError;
use super::fetch::Fetch;

type Responder = Box<dyn Fn(&str) -> Result<Value, AttemptError>>;

/// [`Fetch`] implementation answering from a closure and recording every URL
/// it was asked for, in order.
///
/// Wrap it in an `Rc` to keep a handle for assertions after handing a clone to
/// the resolver.
pub struct StubFetcher {
    respond: Responder,
    calls: RefCell<Vec<String>>,
}

impl StubFetcher {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Result<Value, AttemptError> + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every URL requested so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl Fetch for StubFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, AttemptError> {
        self.calls.borrow_mut().push(url.to_string());
        (self.respond)(url)
    }
}
