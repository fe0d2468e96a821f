//! In-memory response cache with time-based expiry.
//!
//! Entries are keyed by request URL and live for the process lifetime; a stale
//! entry reads as absent and is overwritten by the next successful fetch.
//! The cache is confined to one cooperative thread, so it uses `RefCell`
//! rather than a lock. Borrows never span an `.await`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use serde_json::Value;

/// A previously fetched payload.
#[derive(Debug, Clone)]
pub struct CachedEntry {
    pub payload: Rc<Value>,
    pub fetched_at: Instant,
}

impl CachedEntry {
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// URL-keyed payload store shared by the resolver and the gateway.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: RefCell<HashMap<String, CachedEntry>>,
}

impl ResponseCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RefCell::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh payload for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Rc<Value>> {
        self.get_at(key, Instant::now())
    }

    /// Like [`get`](Self::get), evaluated as of `now`.
    #[must_use]
    pub fn get_at(&self, key: &str, now: Instant) -> Option<Rc<Value>> {
        self.entries
            .borrow()
            .get(key)
            .filter(|entry| entry.is_fresh(self.ttl, now))
            .map(|entry| Rc::clone(&entry.payload))
    }

    /// Store `payload` under `key`, replacing any previous entry.
    pub fn put(&self, key: impl Into<String>, payload: Value) -> Rc<Value> {
        self.put_at(key, payload, Instant::now())
    }

    pub fn put_at(&self, key: impl Into<String>, payload: Value, now: Instant) -> Rc<Value> {
        let payload = Rc::new(payload);
        self.entries.borrow_mut().insert(
            key.into(),
            CachedEntry {
                payload: Rc::clone(&payload),
                fetched_at: now,
            },
        );
        payload
    }

    /// Number of stored entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
