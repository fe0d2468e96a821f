//! Page chrome the dispatcher drives on every navigation.

/// Document-level collaborator of the [`super::Router`].
///
/// The browser build backs this with the DOM; the CLI and tests use plain
/// in-memory or terminal implementations.
pub trait Shell {
    /// Targets of the navigation links, e.g. `#/deputes`.
    fn nav_links(&self) -> Vec<String>;

    fn set_link_active(&mut self, link: &str, active: bool);

    /// Show the not-found state for `path`, with a way back to `#/`.
    fn render_not_found(&mut self, path: &str);

    fn scroll_to_top(&mut self);

    fn close_mobile_menu(&mut self);
}
