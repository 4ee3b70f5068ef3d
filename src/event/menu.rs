use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, Focus};

/// Cursor movement and activation over the sidebar rows
pub fn handle_menu_key(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Down => app.move_menu_cursor(1),
        KeyCode::Up => app.move_menu_cursor(-1),
        KeyCode::PageDown => app.move_menu_cursor(10),
        KeyCode::PageUp => app.move_menu_cursor(-10),
        KeyCode::Home => app.move_menu_cursor(isize::MIN),
        KeyCode::End => app.move_menu_cursor(isize::MAX),
        KeyCode::Enter => app.activate_menu_item(),
        KeyCode::Esc | KeyCode::Tab => app.set_focus(Focus::Body),
        _ => false,
    }
}
