//! Sidebar navigator
//!
//! Holds the filter query, the ranked candidate list and the keyboard
//! selection. With an empty query the navigator is idle and the menu is shown
//! grouped by category; any other query switches it to filtering, where the
//! selection walks the candidates and confirming navigates to the selected
//! entry.

use crate::catalog::{Catalog, Entry};
use crate::filter::candidate_indices;
use crate::keys::{GlobalKeys, Shortcut, Subscription};
use crate::menu;
use crate::router::Router;
use std::cell::Cell;
use std::rc::Rc;

/// Events that can be sent to the navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorEvent {
    QueryChanged(String),
    MoveDown,
    MoveUp,
    Confirm,
    /// Direct selection of an entry by display name, bypassing the keyboard.
    ItemActivated(String),
    Clear,
    GlobalShortcut { search_focused: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Filtering {
        candidates: Vec<usize>,
        /// `None` only when there are no candidates.
        selected: Option<usize>,
    },
}

/// Focus change the host should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    Search,
    Blur,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub changed: bool,
    pub focus: Option<FocusRequest>,
    pub navigated_to: Option<String>,
}

/// A row in the navigator view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewRow<'a> {
    Heading(String),
    Entry { entry: &'a Entry, is_selected: bool },
}

/// View model for rendering the navigator
#[derive(Debug, Clone)]
pub struct NavigatorViewModel<'a> {
    pub query: &'a str,
    pub is_filtering: bool,
    pub rows: Vec<ViewRow<'a>>,
    pub show_arrows: bool,
}

struct ShortcutListener {
    _subscription: Subscription,
    pending: Rc<Cell<usize>>,
}

pub struct SidebarNavigator {
    catalog: Catalog,
    query: String,
    phase: Phase,
    selected_target: Option<String>,
    shortcut: Shortcut,
    listener: Option<ShortcutListener>,
    // Set when the shortcut moved focus to the search input; the next event
    // may be that same keystroke landing in the input.
    focus_keystroke_armed: bool,
}

impl std::fmt::Debug for SidebarNavigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SidebarNavigator")
            .field("query", &self.query)
            .field("phase", &self.phase)
            .field("selected_target", &self.selected_target)
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl SidebarNavigator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            query: String::new(),
            phase: Phase::Idle,
            selected_target: None,
            shortcut: Shortcut::default(),
            listener: None,
            focus_keystroke_armed: false,
        }
    }

    /// Start listening for `shortcut` on the global key source. Mounting
    /// again replaces the previous subscription.
    pub fn mount(&mut self, keys: &GlobalKeys, shortcut: Shortcut) {
        let pending = Rc::new(Cell::new(0));
        let counter = pending.clone();
        let subscription = keys.subscribe(move |key| {
            if shortcut.matches(key) {
                counter.set(counter.get() + 1);
            }
        });

        self.shortcut = shortcut;
        self.listener = Some(ShortcutListener {
            _subscription: subscription,
            pending,
        });
        log::debug!("Navigator: mounted with shortcut '{}'", shortcut.key);
    }

    pub fn unmount(&mut self) {
        if self.listener.take().is_some() {
            log::debug!("Navigator: unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// True if the shortcut was pressed since the last call.
    pub fn take_shortcut(&mut self) -> bool {
        match &self.listener {
            Some(listener) => listener.pending.replace(0) > 0,
            None => false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Replace the entry list. An active filter is re-run and the selection
    /// is clamped to the new candidate list.
    pub fn set_catalog(&mut self, catalog: Catalog, router: &dyn Router) {
        self.catalog = catalog;
        let previous = self.selected_index();
        self.refilter();
        if let (Some(previous), Phase::Filtering { candidates, selected }) = (previous, &mut self.phase) {
            if !candidates.is_empty() {
                *selected = Some(previous.min(candidates.len() - 1));
            }
        }
        self.retarget(router);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_filtering(&self) -> bool {
        matches!(self.phase, Phase::Filtering { .. })
    }

    pub fn selected_index(&self) -> Option<usize> {
        match &self.phase {
            Phase::Filtering { selected, .. } => *selected,
            Phase::Idle => None,
        }
    }

    pub fn selected_target(&self) -> Option<&str> {
        self.selected_target.as_deref()
    }

    pub fn candidates(&self) -> Vec<&Entry> {
        match &self.phase {
            Phase::Filtering { candidates, .. } => candidates
                .iter()
                .map(|&i| &self.catalog.entries[i])
                .collect(),
            Phase::Idle => Vec::new(),
        }
    }

    fn selected_entry(&self) -> Option<&Entry> {
        match &self.phase {
            Phase::Filtering {
                candidates,
                selected: Some(i),
            } => candidates.get(*i).map(|&idx| &self.catalog.entries[idx]),
            _ => None,
        }
    }

    /// Handle an event and report what the host has to do
    pub fn handle_event(&mut self, event: NavigatorEvent, router: &mut dyn Router) -> Transition {
        let state_before = (self.query.clone(), self.phase.clone(), self.selected_target.clone());
        let mut transition = Transition::default();
        let focus_keystroke_armed = std::mem::take(&mut self.focus_keystroke_armed);

        match event {
            NavigatorEvent::QueryChanged(new_query) => {
                if focus_keystroke_armed && self.is_focus_keystroke(&new_query) {
                    log::debug!("Navigator: ignoring focus keystroke '{}'", new_query);
                    return transition;
                }
                self.query = new_query;
                self.refilter();
                self.retarget(&*router);
            }

            NavigatorEvent::MoveDown => {
                if let Phase::Filtering {
                    candidates,
                    selected: Some(i),
                } = &mut self.phase
                {
                    *i = (*i + 1).min(candidates.len() - 1);
                    self.retarget(&*router);
                }
            }

            NavigatorEvent::MoveUp => {
                if let Phase::Filtering {
                    selected: Some(i), ..
                } = &mut self.phase
                {
                    *i = i.saturating_sub(1);
                    self.retarget(&*router);
                }
            }

            NavigatorEvent::Confirm => {
                if self.is_filtering() {
                    if let Some(target) = self.selected_target.take() {
                        log::info!("Navigator: confirmed {}", target);
                        router.navigate(&target);
                        self.reset();
                        transition.navigated_to = Some(target);
                    }
                }
            }

            NavigatorEvent::ItemActivated(display_name) => {
                let Some(path) = self.catalog.find(&display_name).map(|e| router.resolve_path(e)) else {
                    log::warn!("Navigator: no entry named '{}'", display_name);
                    return transition;
                };
                if !self.query.is_empty() {
                    self.reset();
                }
                log::info!("Navigator: activated {} -> {}", display_name, path);
                router.navigate(&path);
                transition.navigated_to = Some(path);
                transition.focus = Some(FocusRequest::Blur);
            }

            NavigatorEvent::Clear => {
                self.reset();
            }

            NavigatorEvent::GlobalShortcut { search_focused } => {
                if !search_focused {
                    self.focus_keystroke_armed = true;
                    transition.focus = Some(FocusRequest::Search);
                }
            }
        }

        let state_after = (self.query.clone(), self.phase.clone(), self.selected_target.clone());
        transition.changed = state_before != state_after;
        transition
    }

    /// The focusing keystroke also lands in the freshly focused input as the
    /// current query with the shortcut character appended.
    fn is_focus_keystroke(&self, query: &str) -> bool {
        query
            .strip_prefix(self.query.as_str())
            .is_some_and(|rest| rest.chars().eq(std::iter::once(self.shortcut.key)))
    }

    fn reset(&mut self) {
        self.query.clear();
        self.phase = Phase::Idle;
        self.selected_target = None;
    }

    fn refilter(&mut self) {
        self.phase = if self.query.is_empty() {
            Phase::Idle
        } else {
            let candidates = candidate_indices(&self.catalog.entries, &self.query);
            let selected = if candidates.is_empty() { None } else { Some(0) };
            Phase::Filtering { candidates, selected }
        };
    }

    fn retarget(&mut self, router: &dyn Router) {
        self.selected_target = self.selected_entry().map(|entry| router.resolve_path(entry));
    }

    pub fn view_model(&self, hide_empty_groups: bool) -> NavigatorViewModel<'_> {
        let mut rows = Vec::new();
        let mut show_arrows = false;

        match &self.phase {
            Phase::Idle => {
                for group in menu::group(&self.catalog.entries, &self.catalog.category_order) {
                    if hide_empty_groups && group.entries.is_empty() {
                        continue;
                    }
                    rows.push(ViewRow::Heading(group.heading));
                    rows.extend(group.entries.into_iter().map(|entry| ViewRow::Entry {
                        entry,
                        is_selected: false,
                    }));
                }
            }
            Phase::Filtering { candidates, selected } => {
                show_arrows = candidates.len() > 1;
                rows.extend(candidates.iter().enumerate().map(|(pos, &idx)| ViewRow::Entry {
                    entry: &self.catalog.entries[idx],
                    is_selected: *selected == Some(pos),
                }));
            }
        }

        NavigatorViewModel {
            query: &self.query,
            is_filtering: self.is_filtering(),
            rows,
            show_arrows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{component_pathname, MemoryRouter, MockRouter};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn scenario_catalog() -> Catalog {
        Catalog {
            title: "Kit".to_string(),
            version: "1.0.0".to_string(),
            repo_url: String::new(),
            category_order: vec!["element".to_string(), "view".to_string()],
            entries: vec![
                Entry::new("Button", "element"),
                Entry::new("Buzzer", "element"),
                Entry::new("Card", "view"),
            ],
        }
    }

    fn names(nav: &SidebarNavigator) -> Vec<&str> {
        nav.candidates().iter().map(|e| e.display_name.as_str()).collect()
    }

    fn query(nav: &mut SidebarNavigator, router: &mut MemoryRouter, q: &str) -> Transition {
        nav.handle_event(NavigatorEvent::QueryChanged(q.to_string()), router)
    }

    #[test]
    fn test_navigator_starts_idle() {
        let nav = SidebarNavigator::new(scenario_catalog());
        assert_eq!(nav.phase(), &Phase::Idle);
        assert_eq!(nav.query(), "");
        assert_eq!(nav.selected_index(), None);
        assert_eq!(nav.selected_target(), None);
        assert!(!nav.is_mounted());
    }

    #[test]
    fn test_query_change_enters_filtering() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();

        let transition = query(&mut nav, &mut router, "Bu");
        assert!(transition.changed);
        assert!(nav.is_filtering());
        assert_eq!(names(&nav), vec!["Button", "Buzzer"]);
        assert_eq!(nav.selected_index(), Some(0));
        assert_eq!(nav.selected_target(), Some("/elements/button"));

        query(&mut nav, &mut router, "utt");
        assert_eq!(names(&nav), vec!["Button"]);

        query(&mut nav, &mut router, "");
        assert_eq!(nav.phase(), &Phase::Idle);
        assert_eq!(nav.selected_target(), None);
    }

    #[test]
    fn test_move_down_clamps() {
        let mut catalog = scenario_catalog();
        catalog.entries.push(Entry::new("Bulb", "element"));
        let mut nav = SidebarNavigator::new(catalog);
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "Bu");
        assert_eq!(nav.candidates().len(), 3);

        for _ in 0..3 {
            nav.handle_event(NavigatorEvent::MoveDown, &mut router);
        }
        assert_eq!(nav.selected_index(), Some(2));
        assert_eq!(nav.selected_target(), Some("/elements/bulb"));

        let transition = nav.handle_event(NavigatorEvent::MoveDown, &mut router);
        assert!(!transition.changed);
    }

    #[test]
    fn test_move_up_clamps() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "Bu");

        nav.handle_event(NavigatorEvent::MoveDown, &mut router);
        assert_eq!(nav.selected_target(), Some("/elements/buzzer"));
        nav.handle_event(NavigatorEvent::MoveUp, &mut router);
        nav.handle_event(NavigatorEvent::MoveUp, &mut router);
        assert_eq!(nav.selected_index(), Some(0));
        assert_eq!(nav.selected_target(), Some("/elements/button"));
    }

    #[test]
    fn test_query_change_resets_selection() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "Bu");
        nav.handle_event(NavigatorEvent::MoveDown, &mut router);
        query(&mut nav, &mut router, "B");
        assert_eq!(nav.selected_index(), Some(0));
    }

    #[test]
    fn test_no_matches_disables_movement_and_confirm() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "zzz");

        assert!(nav.is_filtering());
        assert_eq!(nav.selected_index(), None);
        for event in [NavigatorEvent::MoveDown, NavigatorEvent::MoveUp, NavigatorEvent::Confirm] {
            let transition = nav.handle_event(event, &mut router);
            assert!(!transition.changed);
            assert_eq!(transition.navigated_to, None);
        }
        assert_eq!(router.location(), "/");
        assert_eq!(nav.query(), "zzz");
    }

    #[test]
    fn test_confirm_navigates_and_resets() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "Bu");
        nav.handle_event(NavigatorEvent::MoveDown, &mut router);

        let transition = nav.handle_event(NavigatorEvent::Confirm, &mut router);
        assert_eq!(transition.navigated_to.as_deref(), Some("/elements/buzzer"));
        assert_eq!(router.location(), "/elements/buzzer");
        assert_eq!(nav.query(), "");
        assert_eq!(nav.phase(), &Phase::Idle);
        assert_eq!(nav.selected_target(), None);

        let transition = nav.handle_event(NavigatorEvent::MoveDown, &mut router);
        assert!(!transition.changed);
        assert_eq!(nav.selected_index(), None);
    }

    #[test]
    fn test_confirm_while_idle_is_noop() {
        let mut router = MockRouter::new();
        router.expect_navigate().never();
        let mut nav = SidebarNavigator::new(scenario_catalog());

        let transition = nav.handle_event(NavigatorEvent::Confirm, &mut router);
        assert_eq!(transition, Transition::default());
    }

    #[test]
    fn test_confirm_calls_router_once() {
        let mut router = MockRouter::new();
        router
            .expect_resolve_path()
            .returning(|entry| component_pathname(entry));
        router
            .expect_navigate()
            .withf(|path| path == "/views/card")
            .times(1)
            .return_const(());

        let mut nav = SidebarNavigator::new(scenario_catalog());
        nav.handle_event(NavigatorEvent::QueryChanged("card".to_string()), &mut router);
        nav.handle_event(NavigatorEvent::Confirm, &mut router);
        nav.handle_event(NavigatorEvent::Confirm, &mut router);
    }

    #[test]
    fn test_item_activation_clears_query() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "Bu");

        let transition = nav.handle_event(NavigatorEvent::ItemActivated("Card".to_string()), &mut router);
        assert!(transition.changed);
        assert_eq!(transition.focus, Some(FocusRequest::Blur));
        assert_eq!(router.location(), "/views/card");
        assert_eq!(nav.phase(), &Phase::Idle);
    }

    #[test]
    fn test_item_activation_while_idle_still_navigates() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();

        let transition = nav.handle_event(NavigatorEvent::ItemActivated("Button".to_string()), &mut router);
        assert!(!transition.changed);
        assert_eq!(transition.navigated_to.as_deref(), Some("/elements/button"));
        assert_eq!(router.location(), "/elements/button");
    }

    #[test]
    fn test_unknown_item_is_ignored() {
        let mut router = MockRouter::new();
        router.expect_navigate().never();
        let mut nav = SidebarNavigator::new(scenario_catalog());

        let transition = nav.handle_event(NavigatorEvent::ItemActivated("Nope".to_string()), &mut router);
        assert_eq!(transition, Transition::default());
    }

    fn press_shortcut(nav: &mut SidebarNavigator, router: &mut MemoryRouter) -> Transition {
        nav.handle_event(NavigatorEvent::GlobalShortcut { search_focused: false }, router)
    }

    #[test]
    fn test_focus_keystroke_is_ignored() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();

        press_shortcut(&mut nav, &mut router);
        let transition = query(&mut nav, &mut router, "/");
        assert!(!transition.changed);
        assert_eq!(nav.query(), "");
        assert_eq!(nav.phase(), &Phase::Idle);

        // Only the keystroke right after focusing is discarded.
        query(&mut nav, &mut router, "/");
        assert_eq!(nav.query(), "/");
    }

    #[test]
    fn test_focus_keystroke_keeps_active_query() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "butt");

        press_shortcut(&mut nav, &mut router);
        query(&mut nav, &mut router, "butt/");
        assert_eq!(nav.query(), "butt");
        assert_eq!(nav.candidates().len(), 1);
    }

    #[test]
    fn test_focus_keystroke_guard_is_one_shot() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();

        press_shortcut(&mut nav, &mut router);
        nav.handle_event(NavigatorEvent::MoveDown, &mut router);
        query(&mut nav, &mut router, "/");
        assert_eq!(nav.query(), "/");

        // Any other query change also disarms the guard.
        press_shortcut(&mut nav, &mut router);
        query(&mut nav, &mut router, "/b");
        assert_eq!(nav.query(), "/b");
    }

    #[test]
    fn test_global_shortcut_requests_focus() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();

        let transition = nav.handle_event(
            NavigatorEvent::GlobalShortcut { search_focused: false },
            &mut router,
        );
        assert_eq!(transition.focus, Some(FocusRequest::Search));
        assert!(!transition.changed);

        let transition = nav.handle_event(
            NavigatorEvent::GlobalShortcut { search_focused: true },
            &mut router,
        );
        assert_eq!(transition.focus, None);
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "Card");
        let transition = nav.handle_event(NavigatorEvent::Clear, &mut router);
        assert!(transition.changed);
        assert_eq!(nav.phase(), &Phase::Idle);
    }

    #[test]
    fn test_mount_and_unmount() {
        let keys = GlobalKeys::new();
        let mut nav = SidebarNavigator::new(scenario_catalog());

        nav.mount(&keys, Shortcut::default());
        assert!(nav.is_mounted());
        assert_eq!(keys.listener_count(), 1);

        keys.dispatch(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!nav.take_shortcut());
        keys.dispatch(&KeyEvent::new(KeyCode::Char('/'), KeyModifiers::CONTROL));
        assert!(!nav.take_shortcut());
        keys.dispatch(&KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE));
        assert!(nav.take_shortcut());
        assert!(!nav.take_shortcut());

        nav.unmount();
        assert_eq!(keys.listener_count(), 0);
        keys.dispatch(&KeyEvent::new(KeyCode::Char('/'), KeyModifiers::NONE));
        assert!(!nav.take_shortcut());
    }

    #[test]
    fn test_drop_releases_listener() {
        let keys = GlobalKeys::new();
        {
            let mut nav = SidebarNavigator::new(scenario_catalog());
            nav.mount(&keys, Shortcut::default());
            assert_eq!(keys.listener_count(), 1);
        }
        assert_eq!(keys.listener_count(), 0);
    }

    #[test]
    fn test_letter_shortcut_can_start_a_query() {
        let keys = GlobalKeys::new();
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        nav.mount(&keys, Shortcut::new('b'));

        press_shortcut(&mut nav, &mut router);
        query(&mut nav, &mut router, "b");
        assert_eq!(nav.query(), "");

        query(&mut nav, &mut router, "b");
        query(&mut nav, &mut router, "bu");
        assert_eq!(nav.query(), "bu");
        assert_eq!(nav.candidates().len(), 2);
    }

    #[test]
    fn test_set_catalog_refilters_and_clamps() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "Bu");
        nav.handle_event(NavigatorEvent::MoveDown, &mut router);
        assert_eq!(nav.selected_index(), Some(1));

        let mut smaller = scenario_catalog();
        smaller.entries.retain(|e| e.display_name != "Buzzer");
        nav.set_catalog(smaller, &router);

        assert_eq!(names(&nav), vec!["Button"]);
        assert_eq!(nav.selected_index(), Some(0));
        assert_eq!(nav.selected_target(), Some("/elements/button"));
    }

    #[test]
    fn test_view_model_idle_groups() {
        let mut catalog = scenario_catalog();
        catalog.category_order.push("addon".to_string());
        let nav = SidebarNavigator::new(catalog);

        let view = nav.view_model(false);
        assert!(!view.is_filtering);
        assert_eq!(view.rows.len(), 6);
        assert_eq!(view.rows[0], ViewRow::Heading("Elements".to_string()));
        assert_eq!(view.rows[5], ViewRow::Heading("Addons".to_string()));

        let view = nav.view_model(true);
        assert_eq!(view.rows.len(), 5);
    }

    #[test]
    fn test_view_model_filtering() {
        let mut nav = SidebarNavigator::new(scenario_catalog());
        let mut router = MemoryRouter::default();
        query(&mut nav, &mut router, "Bu");
        nav.handle_event(NavigatorEvent::MoveDown, &mut router);

        let view = nav.view_model(false);
        assert!(view.is_filtering);
        assert!(view.show_arrows);
        assert_eq!(view.query, "Bu");
        assert!(matches!(
            view.rows[1],
            ViewRow::Entry { entry, is_selected: true } if entry.display_name == "Buzzer"
        ));

        query(&mut nav, &mut router, "Card");
        assert!(!nav.view_model(false).show_arrows);
    }
}
