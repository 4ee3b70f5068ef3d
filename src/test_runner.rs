use crate::app::App;
use crate::async_task::TaskResult;
use crate::error::{Result, SidebarError};
use crate::event::handle_event;
use crate::navigator::Phase;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Test file format for headless testing
///
/// Format is a simple text file where each line represents a command:
/// - `key:<keyname>` - Send a key event (e.g., `key:tab`, `key:enter`, `key:ctrl+c`)
/// - `char:<c>` - Send a character (e.g., `char:a`, `char:/`)
/// - `type:<text>` - Send every character of `text` in order
/// - `wait` - Wait for all async tasks to settle
/// - `wait:<ms>` - Wait for specific duration in milliseconds
/// - `settle` - Wait for background tasks to complete (same as `wait`)
/// - `assert:<property>:<value>` - Assert application state
/// - `screenshot:<file>` - Compare (or with `--overwrite`, write) a rendered frame
/// - `# comment` - Comments (ignored)
/// - `immediate` - Set immediate mode (don't wait between commands)
/// - `settle_mode` - Set settle mode (wait between commands)
/// - `no_initial_settle` - Skip waiting for the catalog before the first command
///
/// Examples:
/// ```text
/// # Find a component and open it
/// char:/
/// type:card
/// assert:candidate_count:1
/// key:enter
/// assert:location:/views/card
/// ```

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCommand {
    pub command_type: CommandType,
    pub value: String,
    pub immediate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandType {
    Key,
    Char,
    Type,
    Wait,
    Assert,
    Screenshot,
}

#[derive(Debug, Clone)]
pub struct TestScript {
    pub commands: Vec<TestCommand>,
    pub initial_settle: bool,
}

#[derive(Debug, Clone)]
pub struct TestRunner {
    pub script: TestScript,
    pub current_command: usize,
    pub max_settle_time: Duration,
    pub overwrite_mode: bool,
    pub screenshot_base_dir: Option<PathBuf>,
    pub screen_size: (u16, u16),
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRunner {
    pub fn new() -> Self {
        TestRunner {
            script: TestScript {
                commands: Vec::new(),
                initial_settle: true,
            },
            current_command: 0,
            max_settle_time: Duration::from_secs(5),
            overwrite_mode: false,
            screenshot_base_dir: None,
            screen_size: (120, 30),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_string(&content)
    }

    pub fn from_string(content: &str) -> Result<Self> {
        let mut commands = Vec::new();
        let mut immediate_mode = false;
        let mut initial_settle = true;

        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse special directives
            match line {
                "immediate" => {
                    immediate_mode = true;
                    continue;
                }
                "settle_mode" => {
                    immediate_mode = false;
                    continue;
                }
                "no_initial_settle" => {
                    initial_settle = false;
                    continue;
                }
                _ => {}
            }

            let (command_type, value, immediate) = if line == "wait" || line == "settle" {
                // Wait commands always wait
                (CommandType::Wait, "", false)
            } else if let Some(ms) = line.strip_prefix("wait:") {
                (CommandType::Wait, ms, false)
            } else if let Some(key) = line.strip_prefix("key:") {
                (CommandType::Key, key, immediate_mode)
            } else if let Some(ch) = line.strip_prefix("char:") {
                if ch.chars().count() != 1 {
                    return Err(SidebarError::Script {
                        line: line_num + 1,
                        message: format!("char: expects exactly one character, got '{}'", ch),
                    });
                }
                (CommandType::Char, ch, immediate_mode)
            } else if let Some(text) = line.strip_prefix("type:") {
                (CommandType::Type, text, immediate_mode)
            } else if let Some(assertion) = line.strip_prefix("assert:") {
                (CommandType::Assert, assertion, immediate_mode)
            } else if let Some(file) = line.strip_prefix("screenshot:") {
                (CommandType::Screenshot, file, immediate_mode)
            } else {
                return Err(SidebarError::Script {
                    line: line_num + 1,
                    message: format!("Invalid command: {}", line),
                });
            };

            if command_type == CommandType::Key {
                parse_key_event(value).map_err(|message| SidebarError::Script {
                    line: line_num + 1,
                    message,
                })?;
            }
            if command_type == CommandType::Wait && !value.is_empty() && value.parse::<u64>().is_err() {
                return Err(SidebarError::Script {
                    line: line_num + 1,
                    message: format!("Invalid wait duration: {}", value),
                });
            }

            commands.push(TestCommand {
                command_type,
                value: value.to_string(),
                immediate,
            });
        }

        Ok(TestRunner {
            script: TestScript {
                commands,
                initial_settle,
            },
            ..TestRunner::new()
        })
    }

    pub async fn run(
        &mut self,
        app: &mut App,
        mut task_receiver: mpsc::Receiver<TaskResult>,
    ) -> Result<TestResult> {
        let start_time = Instant::now();
        let mut events_processed = 0;
        let mut assertions_passed = 0;
        let mut assertions_failed = 0;
        let mut errors = Vec::new();

        log::info!(
            "🧪 Starting test run with {} commands",
            self.script.commands.len()
        );

        if self.script.initial_settle {
            log::debug!("🧪 Waiting for initial settlement");
            if let Err(e) = self.wait_for_settlement(app, &mut task_receiver).await {
                errors.push(format!("Initial settlement failed: {}", e));
            }
        }

        let commands = self.script.commands.clone();
        for (index, command) in commands.iter().enumerate() {
            self.current_command = index;
            log::debug!("🧪 Executing command {}: {:?}", index, command);

            match command.command_type {
                CommandType::Key => {
                    let key = parse_key_event(&command.value).map_err(SidebarError::Generic)?;
                    handle_event(Event::Key(key), app);
                    events_processed += 1;
                }
                CommandType::Char | CommandType::Type => {
                    for ch in command.value.chars() {
                        let key = KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE);
                        handle_event(Event::Key(key), app);
                        events_processed += 1;
                    }
                }
                CommandType::Wait => {
                    if command.value.is_empty() {
                        if let Err(e) = self.wait_for_settlement(app, &mut task_receiver).await {
                            errors.push(format!("Settlement wait failed: {}", e));
                        }
                    } else {
                        let ms: u64 = command.value.parse().map_err(|_| {
                            SidebarError::Generic(format!("Invalid wait duration: {}", command.value))
                        })?;
                        tokio::time::sleep(Duration::from_millis(ms)).await;
                    }
                }
                CommandType::Assert => match self.evaluate_assertion(app, &command.value) {
                    Ok(true) => {
                        assertions_passed += 1;
                        log::debug!("🧪 Assertion passed: {}", command.value);
                    }
                    Ok(false) => {
                        assertions_failed += 1;
                        errors.push(format!(
                            "Assertion failed: {} (actual: {})",
                            command.value,
                            self.describe_property(app, &command.value)
                        ));
                    }
                    Err(e) => {
                        assertions_failed += 1;
                        errors.push(format!("Assertion error: {}", e));
                    }
                },
                CommandType::Screenshot => {
                    if let Err(e) = self.take_screenshot(app, &command.value) {
                        errors.push(format!("Screenshot failed: {}", e));
                    }
                }
            }

            // Wait for settlement unless in immediate mode or this is a wait command
            if !command.immediate && command.command_type != CommandType::Wait {
                if let Err(e) = self.wait_for_settlement(app, &mut task_receiver).await {
                    errors.push(format!("Post-command settlement failed: {}", e));
                }
            }
        }

        let duration = start_time.elapsed();
        log::info!("🧪 Test run completed in {:?}", duration);

        let success = assertions_failed == 0 && errors.is_empty();
        Ok(TestResult {
            duration,
            events_processed,
            assertions_passed,
            assertions_failed,
            errors,
            success,
        })
    }

    async fn wait_for_settlement(
        &self,
        app: &mut App,
        task_receiver: &mut mpsc::Receiver<TaskResult>,
    ) -> Result<()> {
        let start = Instant::now();

        while app.ui.is_loading && start.elapsed() < self.max_settle_time {
            match timeout(Duration::from_millis(10), task_receiver.recv()).await {
                Ok(Some(task_result)) => {
                    log::debug!("🧪 Processing task result during settlement");
                    crate::main_lib::handle_task_result(app, task_result);
                }
                Ok(None) => break, // Channel closed
                Err(_) => {}
            }
        }

        while let Ok(task_result) = task_receiver.try_recv() {
            log::debug!("🧪 Processing remaining task result");
            crate::main_lib::handle_task_result(app, task_result);
        }

        if app.ui.is_loading {
            return Err(SidebarError::Generic(
                "Settlement timeout: app is still loading".to_string(),
            ));
        }

        Ok(())
    }

    pub fn evaluate_assertion(&self, app: &App, assertion: &str) -> Result<bool> {
        let (property, expected) = assertion.split_once(':').ok_or_else(|| {
            SidebarError::Generic("Assertion must be in format 'property:value'".to_string())
        })?;

        let parse_bool = |name: &str| {
            expected
                .parse::<bool>()
                .map_err(|_| SidebarError::Generic(format!("{} expects boolean value", name)))
        };
        let parse_usize = |name: &str| {
            expected
                .parse::<usize>()
                .map_err(|_| SidebarError::Generic(format!("{} expects numeric value", name)))
        };

        let nav = &app.navigator;
        match property {
            "focus" => Ok(format!("{:?}", app.ui.focus) == expected),
            "query" => Ok(nav.query() == expected),
            "phase" => Ok(phase_name(nav.phase()) == expected),
            "selected_index" => Ok(match nav.selected_index() {
                Some(i) => expected == i.to_string(),
                None => expected == "none",
            }),
            "selected_target" => Ok(match nav.selected_target() {
                Some(target) => target == expected,
                None => expected == "none",
            }),
            "location" => Ok(app.router.location() == expected),
            "candidates" => {
                let names: Vec<&str> = nav
                    .candidates()
                    .iter()
                    .map(|e| e.display_name.as_str())
                    .collect();
                Ok(names.join(",") == expected)
            }
            "candidate_count" => Ok(nav.candidates().len() == parse_usize(property)?),
            "should_quit" => Ok(app.should_quit == parse_bool(property)?),
            "is_loading" => Ok(app.ui.is_loading == parse_bool(property)?),
            "mounted" => Ok(nav.is_mounted() == parse_bool(property)?),
            "status_contains" => Ok(app.ui.status_message.contains(expected)),
            "menu_cursor" => Ok(app.ui.menu_cursor == parse_usize(property)?),
            "history_len" => Ok(app.router.history().len() == parse_usize(property)?),
            "screen_contains" => {
                let (width, height) = self.screen_size;
                let screen = crate::screenshot::render_to_string(app, width, height)?;
                Ok(screen.contains(expected))
            }
            _ => Err(SidebarError::Generic(format!(
                "Unknown assertion property: {}",
                property
            ))),
        }
    }

    /// Current value of the asserted property, for failure messages.
    fn describe_property(&self, app: &App, assertion: &str) -> String {
        let property = assertion.split(':').next().unwrap_or_default();
        let nav = &app.navigator;
        match property {
            "focus" => format!("{:?}", app.ui.focus),
            "query" => nav.query().to_string(),
            "phase" => phase_name(nav.phase()).to_string(),
            "selected_index" => format!("{:?}", nav.selected_index()),
            "selected_target" => format!("{:?}", nav.selected_target()),
            "location" => app.router.location().to_string(),
            "candidates" | "candidate_count" => nav
                .candidates()
                .iter()
                .map(|e| e.display_name.as_str())
                .collect::<Vec<_>>()
                .join(","),
            "status_contains" => app.ui.status_message.clone(),
            "menu_cursor" => app.ui.menu_cursor.to_string(),
            "history_len" => app.router.history().len().to_string(),
            _ => "?".to_string(),
        }
    }

    fn take_screenshot(&self, app: &App, filename: &str) -> Result<()> {
        let (width, height) = self.screen_size;
        let content = crate::screenshot::render_to_string(app, width, height)?;

        let final_path = match &self.screenshot_base_dir {
            Some(base_dir) => base_dir.join(filename),
            None => PathBuf::from(filename),
        };

        if self.overwrite_mode {
            std::fs::write(&final_path, content)?;
            println!("📸 Screenshot saved to: {}", final_path.display());
            return Ok(());
        }

        match std::fs::read_to_string(&final_path) {
            Ok(existing_content) if existing_content == content => {
                println!("✅ Screenshot verification passed: {}", final_path.display());
                Ok(())
            }
            Ok(_) => Err(SidebarError::Generic(format!(
                "❌ Screenshot verification failed: {}. Content differs from expected. Use --overwrite to update.",
                final_path.display()
            ))),
            Err(_) => Err(SidebarError::Generic(format!(
                "❌ Screenshot verification failed: {} does not exist. Use --overwrite to create.",
                final_path.display()
            ))),
        }
    }
}

fn phase_name(phase: &Phase) -> &'static str {
    match phase {
        Phase::Idle => "Idle",
        Phase::Filtering { .. } => "Filtering",
    }
}

/// `tab`, `shift+tab`, `ctrl+c`, `alt+/`, `a`
pub fn parse_key_event(key_str: &str) -> std::result::Result<KeyEvent, String> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = key_str;

    loop {
        let lower = rest.to_lowercase();
        let (modifier, len) = if lower.starts_with("ctrl+") {
            (KeyModifiers::CONTROL, 5)
        } else if lower.starts_with("alt+") {
            (KeyModifiers::ALT, 4)
        } else if lower.starts_with("shift+") {
            (KeyModifiers::SHIFT, 6)
        } else if lower.starts_with("super+") {
            (KeyModifiers::SUPER, 6)
        } else {
            break;
        };
        modifiers |= modifier;
        rest = &rest[len..];
    }

    let mut chars = rest.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(ch), None) => KeyCode::Char(ch),
        _ => match rest.to_lowercase().as_str() {
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::BackTab,
            "tab" => KeyCode::Tab,
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            _ => return Err(format!("Unknown key: {}", key_str)),
        },
    };

    Ok(KeyEvent::new(code, modifiers))
}

#[derive(Debug, Clone)]
pub struct TestResult {
    pub duration: Duration,
    pub events_processed: usize,
    pub assertions_passed: usize,
    pub assertions_failed: usize,
    pub errors: Vec<String>,
    pub success: bool,
}

impl TestResult {
    pub fn print_summary(&self) {
        println!("🧪 Test Results:");
        println!("   Duration: {:?}", self.duration);
        println!("   Events processed: {}", self.events_processed);
        println!("   Assertions passed: {}", self.assertions_passed);
        println!("   Assertions failed: {}", self.assertions_failed);

        if !self.errors.is_empty() {
            println!("   Errors:");
            for error in &self.errors {
                println!("     - {}", error);
            }
        }

        if self.success {
            println!("   Status: ✅ PASSED");
        } else {
            println!("   Status: ❌ FAILED");
        }
    }
}
