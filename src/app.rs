use crate::catalog::Catalog;
use crate::config::Config;
use crate::keys::{GlobalKeys, Shortcut};
use crate::menu::{self, LinkTarget, StaticLink};
use crate::navigator::{FocusRequest, NavigatorEvent, SidebarNavigator, Transition, ViewRow};
use crate::router::{component_pathname, MemoryRouter, Router};
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Focus {
    Body,
    Search,
    Menu,
}

/// A row the menu cursor can land on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Link(StaticLink),
    Entry(String),
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Focus,
    pub menu_cursor: usize,
    pub status_message: String,
    pub is_loading: bool,
    pub force_redraw: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::Body,
            menu_cursor: 0,
            status_message: "Ready".to_string(),
            is_loading: false,
            force_redraw: false,
        }
    }
}

/// Documentation page shown in the content pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug)]
pub struct App {
    pub navigator: SidebarNavigator,
    pub router: MemoryRouter,
    pub keys: GlobalKeys,
    pub config: Config,
    pub ui: UiState,
    pub should_quit: bool,
}

impl App {
    /// App waiting for its catalog to be loaded in the background.
    pub fn new(config: Config) -> Self {
        let mut app = Self::with_catalog(Catalog::empty(), config);
        app.ui.is_loading = true;
        app.ui.status_message = "Loading catalog...".to_string();
        app
    }

    pub fn with_catalog(catalog: Catalog, config: Config) -> Self {
        let keys = GlobalKeys::new();
        let mut navigator = SidebarNavigator::new(catalog);
        navigator.mount(&keys, Shortcut::new(config.keybindings.focus_search));

        Self {
            navigator,
            router: MemoryRouter::default(),
            keys,
            config,
            ui: UiState::default(),
            should_quit: false,
        }
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut app = Self::with_catalog(snapshot.catalog.clone(), snapshot.config.clone());

        for path in snapshot.history.iter().skip_while(|p| p.as_str() == "/") {
            app.router.navigate(path);
        }
        if !snapshot.query.is_empty() {
            app.dispatch(NavigatorEvent::QueryChanged(snapshot.query.clone()));
            for _ in 0..snapshot.selected_index.unwrap_or(0) {
                app.dispatch(NavigatorEvent::MoveDown);
            }
        }
        app.ui.focus = snapshot.focus;
        app.ui.menu_cursor = snapshot.menu_cursor;
        app.clamp_menu_cursor();
        app.ui.status_message = snapshot.status_message.clone();
        app
    }

    pub fn load_catalog(&mut self, catalog: Catalog) {
        let count = catalog.entries.len();
        self.navigator.set_catalog(catalog, &self.router);
        self.clamp_menu_cursor();
        self.ui.is_loading = false;
        self.ui.status_message = format!("Loaded {} components", count);
    }

    /// Send an event to the navigator and apply the resulting transition.
    pub fn dispatch(&mut self, event: NavigatorEvent) -> bool {
        let transition = self.navigator.handle_event(event, &mut self.router);
        self.apply_transition(transition)
    }

    fn apply_transition(&mut self, transition: Transition) -> bool {
        let mut changed = transition.changed;

        match transition.focus {
            Some(FocusRequest::Search) => changed |= self.set_focus(Focus::Search),
            Some(FocusRequest::Blur) if self.ui.focus == Focus::Search => {
                changed |= self.set_focus(Focus::Body);
            }
            _ => {}
        }

        if let Some(path) = transition.navigated_to {
            self.ui.status_message = format!("Navigated to {}", path);
            changed = true;
        }

        if changed {
            self.clamp_menu_cursor();
        }
        changed
    }

    /// Feed pending global shortcut presses to the navigator.
    pub fn process_global_shortcut(&mut self) -> bool {
        if !self.navigator.take_shortcut() {
            return false;
        }
        let search_focused = self.ui.focus == Focus::Search;
        self.dispatch(NavigatorEvent::GlobalShortcut { search_focused })
    }

    pub fn set_focus(&mut self, focus: Focus) -> bool {
        if self.ui.focus == focus {
            return false;
        }
        log::debug!("Focus: {:?} -> {:?}", self.ui.focus, focus);
        self.ui.focus = focus;
        if focus == Focus::Menu {
            self.clamp_menu_cursor();
        }
        true
    }

    pub fn links(&self) -> Vec<StaticLink> {
        if self.config.layout.show_getting_started {
            menu::getting_started_links(self.navigator.catalog())
        } else {
            Vec::new()
        }
    }

    /// Every row the menu cursor can visit, top to bottom.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let mut items: Vec<MenuItem> = self.links().into_iter().map(MenuItem::Link).collect();
        let view = self.navigator.view_model(self.config.layout.hide_empty_groups);
        items.extend(view.rows.into_iter().filter_map(|row| match row {
            ViewRow::Entry { entry, .. } => Some(MenuItem::Entry(entry.display_name.clone())),
            ViewRow::Heading(_) => None,
        }));
        items
    }

    fn clamp_menu_cursor(&mut self) {
        let len = self.menu_items().len();
        self.ui.menu_cursor = self.ui.menu_cursor.min(len.saturating_sub(1));
    }

    pub fn move_menu_cursor(&mut self, delta: isize) -> bool {
        let len = self.menu_items().len();
        if len == 0 {
            return false;
        }
        let next = self
            .ui
            .menu_cursor
            .saturating_add_signed(delta)
            .min(len - 1);
        let changed = next != self.ui.menu_cursor;
        self.ui.menu_cursor = next;
        changed
    }

    pub fn activate_menu_item(&mut self) -> bool {
        let Some(item) = self.menu_items().into_iter().nth(self.ui.menu_cursor) else {
            return false;
        };

        match item {
            MenuItem::Entry(name) => self.dispatch(NavigatorEvent::ItemActivated(name)),
            MenuItem::Link(link) => self.follow_link(&link),
        }
    }

    pub fn follow_link(&mut self, link: &StaticLink) -> bool {
        match &link.target {
            LinkTarget::Internal(path) => {
                self.router.navigate(path);
                self.ui.status_message = format!("Navigated to {}", path);
            }
            LinkTarget::External(url) => {
                self.router.open_external(url);
                self.ui.status_message = format!("Opened {}", url);
            }
        }
        true
    }

    pub fn go_back(&mut self) -> bool {
        if self.router.back() {
            self.ui.status_message = format!("Back to {}", self.router.location());
            true
        } else {
            false
        }
    }

    pub fn current_page(&self) -> Page {
        let location = self.router.location();
        let catalog = self.navigator.catalog();

        let static_page = self.links().into_iter().find(|link| {
            matches!(&link.target, LinkTarget::Internal(path) if path == location)
        });
        if let Some(link) = static_page {
            return Page {
                title: link.label,
                lines: vec![
                    format!("{} {}", catalog.title, catalog.version),
                    String::new(),
                    format!("Route: {}", location),
                ],
            };
        }

        if let Some(entry) = catalog
            .entries
            .iter()
            .find(|entry| component_pathname(entry) == location)
        {
            return Page {
                title: entry.display_name.clone(),
                lines: vec![
                    format!("Category: {}", menu::heading_for(&entry.category)),
                    String::new(),
                    format!("Route: {}", location),
                ],
            };
        }

        Page {
            title: "Not Found".to_string(),
            lines: vec![format!("No page at {}", location)],
        }
    }
}
