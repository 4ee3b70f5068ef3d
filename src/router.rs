use crate::catalog::Entry;
use heck::ToKebabCase;

/// Routing collaborator used by the navigator
#[cfg_attr(test, mockall::automock)]
pub trait Router {
    /// Path of the documentation page for `entry`.
    fn resolve_path(&self, entry: &Entry) -> String;

    fn navigate(&mut self, path: &str);
}

/// `/elements/button`, `/addons/transitionable-portal`
pub fn component_pathname(entry: &Entry) -> String {
    format!(
        "/{}s/{}",
        entry.category.to_lowercase(),
        entry.display_name.to_kebab_case()
    )
}

/// In-memory router with a browser-like history stack
#[derive(Debug, Clone)]
pub struct MemoryRouter {
    history: Vec<String>,
    external: Vec<String>,
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new("/")
    }
}

impl MemoryRouter {
    pub fn new(initial: &str) -> Self {
        Self {
            history: vec![initial.to_string()],
            external: Vec::new(),
        }
    }

    pub fn location(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Returns false when already at the first location.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    pub fn open_external(&mut self, url: &str) {
        log::info!("Router: opening external link {}", url);
        self.external.push(url.to_string());
    }

    pub fn external_links(&self) -> &[String] {
        &self.external
    }
}

impl Router for MemoryRouter {
    fn resolve_path(&self, entry: &Entry) -> String {
        component_pathname(entry)
    }

    fn navigate(&mut self, path: &str) {
        if self.location() == path {
            return;
        }
        log::debug!("Router: {} -> {}", self.location(), path);
        self.history.push(path.to_string());
    }
}
