use crate::{
    app::App,
    command::Command,
    event::handle_key,
    navigator::NavigatorEvent,
    snapshot::Snapshot,
};

/// Result of executing a command
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub snapshot: Snapshot,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

/// Executes commands against saved snapshots
pub struct Executor;

impl Executor {
    /// Execute a command against a snapshot and return the resulting state
    pub fn execute(snapshot: &Snapshot, command: Command) -> ExecutionResult {
        let mut app = App::from_snapshot(snapshot);
        let status_before = app.ui.status_message.clone();

        Self::apply(&mut app, &command);

        let status_message = if app.should_quit {
            Some("Goodbye!".to_string())
        } else if app.ui.status_message != status_before {
            Some(app.ui.status_message.clone())
        } else {
            None
        };

        ExecutionResult {
            snapshot: Snapshot::from_app(&app),
            status_message,
            should_quit: app.should_quit,
        }
    }

    /// Run `command` on a live app, stopping once it asks to quit.
    pub fn apply(app: &mut App, command: &Command) {
        match command {
            Command::Activate(name) => {
                app.dispatch(NavigatorEvent::ItemActivated(name.clone()));
            }
            Command::Back => {
                app.go_back();
            }
            Command::Sequence(commands) => {
                for cmd in commands {
                    if app.should_quit {
                        break;
                    }
                    Self::apply(app, cmd);
                }
            }
            _ => {
                for key in command.key_events(app.config.keybindings.focus_search) {
                    if app.should_quit {
                        break;
                    }
                    handle_key(key, app);
                }
            }
        }
        log::debug!("Executor: applied {}", command);
    }
}
