use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, Focus};

pub fn handle_body_key(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char(c) if c == app.config.keybindings.quit => {
            app.should_quit = true;
            false
        }
        KeyCode::Esc => {
            app.should_quit = true;
            false
        }
        KeyCode::Tab => app.set_focus(Focus::Menu),
        KeyCode::Backspace => app.go_back(),
        _ => false,
    }
}
