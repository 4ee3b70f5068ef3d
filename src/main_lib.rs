// Library module containing testable functions from main.rs

use crate::app::App;
use crate::async_task::TaskResult;
use crate::command::Command;
use crate::config::Config;
use crate::error::{Result, SidebarError};
use crate::executor::Executor;
use crate::snapshot::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};

pub fn handle_task_result(app: &mut App, result: TaskResult) {
    app.ui.is_loading = false;

    match result {
        TaskResult::CatalogLoaded { catalog } => {
            app.load_catalog(catalog);
        }
        TaskResult::Error { message } => {
            log::error!("Background task failed: {}", message);
            app.ui.status_message = format!("Error: {}", message);
        }
    }
}

pub fn execute_command(
    snapshot_path: &Path,
    command_str: &str,
    output_path: Option<&Path>,
    generate_screenshot: bool,
    width: u16,
    height: u16,
) -> Result<()> {
    let snapshot = Snapshot::load_from_file(snapshot_path)?;

    let command = Command::from_string(command_str).map_err(SidebarError::Generic)?;

    let result = Executor::execute(&snapshot, command);

    let result_json = serde_json::to_string_pretty(&result.snapshot)?;

    match output_path {
        Some(path) => {
            fs::write(path, &result_json)?;
            println!("Result saved to: {}", path.display());
        }
        None => {
            println!("{}", result_json);
        }
    }

    // Show execution summary
    if let Some(status) = &result.status_message {
        eprintln!("Status: {}", status);
    }
    if result.should_quit {
        eprintln!("Command resulted in quit");
    }

    if generate_screenshot {
        let screenshot_path = output_path
            .map(screenshot_path_for)
            .unwrap_or_else(|| PathBuf::from("command_result_screenshot.txt"));

        let app = App::from_snapshot(&result.snapshot);
        let screen = crate::screenshot::render_to_string(&app, width, height)?;
        fs::write(&screenshot_path, screen)?;

        eprintln!("Screenshot saved to: {}", screenshot_path.display());
    }

    Ok(())
}

/// `state.json` -> `state.screenshot.txt`
fn screenshot_path_for(output: &Path) -> PathBuf {
    output.with_extension("screenshot.txt")
}

pub async fn save_current_state(
    output_path: Option<&Path>,
    catalog_path: Option<PathBuf>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let catalog_path = catalog_path.or_else(|| config.catalog.clone());

    let mut app = App::new(config);

    match crate::async_task::load_catalog(catalog_path).await {
        Ok(catalog) => app.load_catalog(catalog),
        Err(e) => {
            app.ui.is_loading = false;
            app.ui.status_message = format!("Error loading catalog: {}", e);
        }
    }

    let snapshot = Snapshot::from_app(&app);
    let snapshot_json = serde_json::to_string_pretty(&snapshot)?;

    match output_path {
        Some(path) => {
            fs::write(path, &snapshot_json)?;
            println!("Current state saved to: {}", path.display());
        }
        None => {
            println!("{}", snapshot_json);
        }
    }

    Ok(())
}
