//! Route table and navigation state machine.

use std::cell::Cell;
use std::mem;
use std::rc::Rc;

use thiserror::Error;

use super::pattern::RoutePattern;
use super::shell::Shell;
use super::target::{is_link_active, path_of, query_of};

/// Callback run when the mounted view is replaced.
pub type Teardown = Box<dyn FnOnce()>;

/// View handler; returns a teardown when the view holds resources.
pub type Handler = Box<dyn FnMut(RouteParams) -> Option<Teardown>>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("route pattern must start with '/': {pattern:?}")]
    MissingLeadingSlash { pattern: String },

    #[error("invalid parameter segment {segment:?} in route pattern {pattern:?}")]
    InvalidParameter { pattern: String, segment: String },
}

/// Navigation counter shared by the router and the views it mounts.
#[derive(Debug, Clone, Default)]
pub struct Generation(Rc<Cell<u64>>);

impl Generation {
    #[must_use]
    pub fn current(&self) -> u64 {
        self.0.get()
    }

    fn advance(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    /// Guard bound to the current navigation.
    #[must_use]
    pub fn guard(&self) -> ViewGuard {
        ViewGuard {
            generation: self.clone(),
            captured: self.current(),
        }
    }
}

/// Captured navigation generation.
///
/// Async completions check [`is_current`](Self::is_current) before writing to
/// the page and drop their result once the user has navigated elsewhere.
#[derive(Debug, Clone)]
pub struct ViewGuard {
    generation: Generation,
    captured: u64,
}

impl ViewGuard {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.generation.current() == self.captured
    }
}

/// Parameters handed to a matched handler.
#[derive(Debug, Clone)]
pub struct RouteParams {
    names: Vec<String>,
    values: Vec<String>,
    query: Vec<(String, String)>,
    guard: ViewGuard,
}

impl RouteParams {
    /// Positional values in pattern order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// First value of query parameter `key`, e.g. `q` in `#/deputes?q=x`.
    #[must_use]
    pub fn query(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn guard(&self) -> ViewGuard {
        self.guard.clone()
    }
}

/// What a navigation resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Matched { pattern: String, params: Vec<String> },
    NotFound { path: String },
}

enum ViewState {
    Idle,
    Mounted(Teardown),
}

struct Route {
    pattern: RoutePattern,
    handler: Handler,
}

/// Hash-style router: ordered patterns, one mounted view at a time.
///
/// Every [`navigate`](Self::navigate) tears down the mounted view, advances
/// the [`Generation`], dispatches to the first matching route (or the
/// not-found state), then refreshes the shell's navigation chrome.
pub struct Router<S: Shell> {
    routes: Vec<Route>,
    state: ViewState,
    generation: Generation,
    shell: S,
}

impl<S: Shell> Router<S> {
    pub fn new(shell: S) -> Self {
        Self {
            routes: Vec::new(),
            state: ViewState::Idle,
            generation: Generation::default(),
            shell,
        }
    }

    /// Register a route; earlier registrations win.
    ///
    /// # Errors
    /// Returns [`RouteError`] for a malformed pattern.
    pub fn add_route<F>(&mut self, pattern: &str, handler: F) -> Result<(), RouteError>
    where
        F: FnMut(RouteParams) -> Option<Teardown> + 'static,
    {
        self.routes.push(Route {
            pattern: RoutePattern::parse(pattern)?,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Handle a navigation-target change.
    pub fn navigate(&mut self, target: &str) -> Dispatch {
        if let ViewState::Mounted(teardown) = mem::replace(&mut self.state, ViewState::Idle) {
            teardown();
        }
        self.generation.advance();

        let path = path_of(target);
        let matched = self
            .routes
            .iter_mut()
            .find_map(|route| route.pattern.matches(&path).map(|values| (route, values)));

        let dispatch = match matched {
            Some((route, values)) => {
                tracing::info!(path = %path, pattern = route.pattern.as_str(), "route dispatched");
                let params = RouteParams {
                    names: route.pattern.param_names(),
                    values: values.clone(),
                    query: query_of(target),
                    guard: self.generation.guard(),
                };
                if let Some(teardown) = (route.handler)(params) {
                    self.state = ViewState::Mounted(teardown);
                }
                Dispatch::Matched {
                    pattern: route.pattern.as_str().to_string(),
                    params: values,
                }
            }
            None => {
                tracing::info!(path = %path, "no route matched");
                self.shell.render_not_found(&path);
                Dispatch::NotFound { path: path.clone() }
            }
        };

        for link in self.shell.nav_links() {
            let active = is_link_active(&link, &path);
            self.shell.set_link_active(&link, active);
        }
        self.shell.scroll_to_top();
        self.shell.close_mobile_menu();

        dispatch
    }

    /// Whether the current view registered a teardown.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        matches!(self.state, ViewState::Mounted(_))
    }

    #[must_use]
    pub const fn generation(&self) -> &Generation {
        &self.generation
    }

    #[must_use]
    pub const fn shell(&self) -> &S {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut S {
        &mut self.shell
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::mock::MemoryShell;
    use std::cell::RefCell;

    #[test]
    fn test_params_by_name() {
        let seen = Rc::new(RefCell::new(None));
        let mut router = Router::new(MemoryShell::default());
        let sink = Rc::clone(&seen);
        router
            .add_route("/a/:first/:second", move |params| {
                *sink.borrow_mut() = Some((
                    params.get("first").map(str::to_string),
                    params.get("second").map(str::to_string),
                    params.get("third").map(str::to_string),
                    params.query("q").map(str::to_string),
                ));
                None
            })
            .expect("valid");

        router.navigate("#/a/x/y?q=abc");

        assert_eq!(
            *seen.borrow(),
            Some((
                Some("x".to_string()),
                Some("y".to_string()),
                None,
                Some("abc".to_string())
            ))
        );
    }

    #[test]
    fn test_handler_without_teardown_leaves_router_idle() {
        let mut router = Router::new(MemoryShell::default());
        router.add_route("/", |_| None).expect("valid");
        router.navigate("#/");
        assert!(!router.is_mounted());
    }

    #[test]
    fn test_guard_expires_on_next_navigation() {
        let guards = Rc::new(RefCell::new(Vec::new()));
        let mut router = Router::new(MemoryShell::default());
        let sink = Rc::clone(&guards);
        router
            .add_route("/", move |params| {
                sink.borrow_mut().push(params.guard());
                None
            })
            .expect("valid");

        router.navigate("#/");
        assert!(guards.borrow()[0].is_current());

        router.navigate("#/");
        assert!(!guards.borrow()[0].is_current());
        assert!(guards.borrow()[1].is_current());
    }

    #[test]
    fn test_generation_advances_on_not_found() {
        let mut router = Router::new(MemoryShell::default());
        let before = router.generation().guard();
        router.navigate("#/nowhere");
        assert!(!before.is_current());
        assert_eq!(router.generation().current(), 1);
    }
}
