//! Recording [`ViewSink`] for tests.

use std::cell::RefCell;

use super::page::{Page, ViewSink};

/// Keeps every page shown, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pages: RefCell<Vec<Page>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> Vec<Page> {
        self.pages.borrow().clone()
    }

    pub fn last(&self) -> Option<Page> {
        self.pages.borrow().last().cloned()
    }

    pub fn titles(&self) -> Vec<String> {
        self.pages
            .borrow()
            .iter()
            .map(|page| page.title.clone())
            .collect()
    }
}

impl ViewSink for MemorySink {
    fn show(&self, page: Page) {
        self.pages.borrow_mut().push(page);
    }
}
