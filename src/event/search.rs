use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus};
use crate::navigator::NavigatorEvent;

/// Keys typed while the filter input has focus
pub fn handle_search_key(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char(c) => {
            if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                return false;
            }
            let mut query = app.navigator.query().to_string();
            query.push(c);
            app.dispatch(NavigatorEvent::QueryChanged(query))
        }
        KeyCode::Backspace => {
            let mut query = app.navigator.query().to_string();
            if query.pop().is_none() {
                return false;
            }
            app.dispatch(NavigatorEvent::QueryChanged(query))
        }
        KeyCode::Down => app.dispatch(NavigatorEvent::MoveDown),
        KeyCode::Up => app.dispatch(NavigatorEvent::MoveUp),
        KeyCode::Enter => app.dispatch(NavigatorEvent::Confirm),
        KeyCode::Esc => {
            let cleared = app.dispatch(NavigatorEvent::Clear);
            app.set_focus(Focus::Body) || cleared
        }
        KeyCode::Tab => app.set_focus(Focus::Menu),
        _ => false,
    }
}
