use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus};

pub mod body;
pub mod menu;
pub mod search;

pub use body::*;
pub use menu::*;
pub use search::*;

/// Returns true if the UI needs to be redrawn
pub fn handle_event(event: Event, app: &mut App) -> bool {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key, app),
        Event::Resize(_, _) => true,
        _ => false,
    }
}

pub fn handle_key(key: KeyEvent, app: &mut App) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return false;
    }

    if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.ui.force_redraw = true;
        app.ui.status_message = "Screen refreshed".to_string();
        return true;
    }

    // Global listeners see the key before whichever widget has focus.
    app.keys.dispatch(&key);
    let mut changed = app.process_global_shortcut();

    changed |= match app.ui.focus {
        Focus::Search => handle_search_key(key, app),
        Focus::Menu => handle_menu_key(key, app),
        Focus::Body => handle_body_key(key, app),
    };
    changed
}
