//! In-memory [`Shell`] for tests.

use std::collections::BTreeSet;

use super::shell::Shell;

/// Records everything the router asks of the page chrome.
#[derive(Debug, Clone, Default)]
pub struct MemoryShell {
    pub links: Vec<String>,
    pub active: BTreeSet<String>,
    pub not_found: Vec<String>,
    pub scrolls: usize,
    pub menu_closes: usize,
}

impl MemoryShell {
    pub fn with_links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            links: links.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Active links in sorted order.
    pub fn active_links(&self) -> Vec<&str> {
        self.active.iter().map(String::as_str).collect()
    }
}

impl Shell for MemoryShell {
    fn nav_links(&self) -> Vec<String> {
        self.links.clone()
    }

    fn set_link_active(&mut self, link: &str, active: bool) {
        if active {
            self.active.insert(link.to_string());
        } else {
            self.active.remove(link);
        }
    }

    fn render_not_found(&mut self, path: &str) {
        self.not_found.push(path.to_string());
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }

    fn close_mobile_menu(&mut self) {
        self.menu_closes += 1;
    }
}
