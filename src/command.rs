use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::fmt;

/// User commands accepted by `execute` and by the headless tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    // Global
    FocusSearch,
    Quit,

    // Filter input
    SearchInput(char),
    Type(String),
    Backspace,
    Down,
    Up,
    Enter,
    Escape,
    Tab,

    // Routing
    Activate(String),
    Back,

    // Multi-step commands for testing
    Sequence(Vec<Command>),
}

impl Command {
    /// Parse a command from a string representation
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "focus_search" | "/" => Ok(Command::FocusSearch),
            "quit" => Ok(Command::Quit),

            "backspace" => Ok(Command::Backspace),
            "down" | "move_down" => Ok(Command::Down),
            "up" | "move_up" => Ok(Command::Up),
            "enter" | "confirm" => Ok(Command::Enter),
            "escape" | "esc" => Ok(Command::Escape),
            "tab" => Ok(Command::Tab),
            "back" => Ok(Command::Back),

            _ => {
                if let Some(char_str) = s.strip_prefix("search:") {
                    let mut chars = char_str.chars();
                    if let (Some(ch), None) = (chars.next(), chars.next()) {
                        return Ok(Command::SearchInput(ch));
                    }
                    return Err(format!("search: expects a single character, got '{}'", char_str));
                }

                if let Some(text) = s.strip_prefix("type:") {
                    return Ok(Command::Type(text.to_string()));
                }

                if let Some(name) = s.strip_prefix("activate:") {
                    if name.is_empty() {
                        return Err("activate: expects a component name".to_string());
                    }
                    return Ok(Command::Activate(name.to_string()));
                }

                if let Some(inner) = s
                    .strip_prefix("sequence:[")
                    .and_then(|rest| rest.strip_suffix(']'))
                {
                    if inner.is_empty() {
                        return Ok(Command::Sequence(vec![]));
                    }

                    let mut commands = Vec::new();
                    for cmd_str in inner.split(',') {
                        let cmd_str = cmd_str.trim();
                        match Command::from_string(cmd_str) {
                            Ok(cmd) => commands.push(cmd),
                            Err(e) => {
                                return Err(format!(
                                    "Invalid command in sequence '{}': {}",
                                    cmd_str, e
                                ))
                            }
                        }
                    }

                    return Ok(Command::Sequence(commands));
                }

                Err(format!("Unknown command: {}", s))
            }
        }
    }

    /// Key presses that reproduce this command. `Activate` and `Back` have
    /// no single keystroke and return an empty list.
    pub fn key_events(&self, shortcut: char) -> Vec<KeyEvent> {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        match self {
            Command::FocusSearch => vec![key(KeyCode::Char(shortcut))],
            Command::Quit => vec![KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)],
            Command::SearchInput(ch) => vec![key(KeyCode::Char(*ch))],
            Command::Type(text) => text.chars().map(|ch| key(KeyCode::Char(ch))).collect(),
            Command::Backspace => vec![key(KeyCode::Backspace)],
            Command::Down => vec![key(KeyCode::Down)],
            Command::Up => vec![key(KeyCode::Up)],
            Command::Enter => vec![key(KeyCode::Enter)],
            Command::Escape => vec![key(KeyCode::Esc)],
            Command::Tab => vec![key(KeyCode::Tab)],
            Command::Activate(_) | Command::Back => Vec::new(),
            Command::Sequence(commands) => commands
                .iter()
                .flat_map(|c| c.key_events(shortcut))
                .collect(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::FocusSearch => write!(f, "focus_search"),
            Command::Quit => write!(f, "quit"),
            Command::SearchInput(ch) => write!(f, "search:{}", ch),
            Command::Type(text) => write!(f, "type:{}", text),
            Command::Backspace => write!(f, "backspace"),
            Command::Down => write!(f, "down"),
            Command::Up => write!(f, "up"),
            Command::Enter => write!(f, "enter"),
            Command::Escape => write!(f, "escape"),
            Command::Tab => write!(f, "tab"),
            Command::Activate(name) => write!(f, "activate:{}", name),
            Command::Back => write!(f, "back"),
            Command::Sequence(commands) => write!(
                f,
                "sequence:[{}]",
                commands
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}
