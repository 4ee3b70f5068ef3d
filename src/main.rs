use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::{Path, PathBuf};
use std::{io, time::Duration};
use tokio::sync::mpsc;

use docs_sidebar::app::App;
use docs_sidebar::async_task::{self, Task, TaskResult};
use docs_sidebar::cli::{Cli, Commands};
use docs_sidebar::config::Config;
use docs_sidebar::error::{Result, SidebarError};
use docs_sidebar::snapshot::Snapshot;
use docs_sidebar::test_runner::TestRunner;
use docs_sidebar::{event, main_lib, screenshot, ui};

const LOG_ENV_VAR: &str = "DOCS_SIDEBAR_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger only if DOCS_SIDEBAR_LOG environment variable is set
    if let Ok(log_file) = std::env::var(LOG_ENV_VAR) {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        env_logger::Builder::new()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .filter_level(log::LevelFilter::Debug)
            .init();

        log::info!("docs-sidebar starting up");
    }

    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Commands::Run { catalog, config } => run_interactive(catalog, config.as_deref()).await,
        Commands::Screenshot {
            state,
            output,
            width,
            height,
        } => screenshot::generate_screenshot(&state, output.as_deref(), width, height),
        Commands::Execute {
            state,
            command,
            output,
            screenshot,
            width,
            height,
        } => main_lib::execute_command(
            &state,
            &command,
            output.as_deref(),
            screenshot,
            width,
            height,
        ),
        Commands::SaveState {
            output,
            catalog,
            config,
        } => main_lib::save_current_state(output.as_deref(), catalog, config.as_deref()).await,
        Commands::Test {
            script,
            state,
            catalog,
            settle_timeout,
            overwrite,
            verbose,
        } => {
            run_headless_test(
                &script,
                state.as_deref(),
                catalog,
                settle_timeout,
                overwrite,
                verbose,
            )
            .await
        }
    }
}

fn spawn_worker() -> (
    mpsc::Sender<Task>,
    mpsc::Receiver<TaskResult>,
    tokio::task::JoinHandle<()>,
) {
    let (task_sender, task_receiver) = mpsc::channel::<Task>(32);
    let (result_sender, result_receiver) = mpsc::channel::<TaskResult>(32);
    let handle = tokio::spawn(async_task::run_worker(task_receiver, result_sender));
    (task_sender, result_receiver, handle)
}

async fn request_catalog(app: &mut App, task_sender: &mpsc::Sender<Task>, path: Option<PathBuf>) {
    log::info!("📤 Sending LoadCatalog task");
    if let Err(e) = task_sender.send(Task::LoadCatalog { path }).await {
        log::error!("📤 Failed to send LoadCatalog task: {}", e);
        app.ui.is_loading = false;
        app.ui.status_message = format!("Failed to load catalog: {}", e);
    }
}

async fn run_headless_test(
    script_path: &Path,
    state_path: Option<&Path>,
    catalog: Option<PathBuf>,
    settle_timeout: u64,
    overwrite: bool,
    verbose: bool,
) -> Result<()> {
    if verbose && std::env::var(LOG_ENV_VAR).is_err() {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    }

    log::info!("🧪 Starting headless test run");
    log::info!("🧪 Script: {}", script_path.display());

    let (task_sender, result_receiver, worker_handle) = spawn_worker();

    let mut app = match state_path {
        Some(path) => {
            log::info!("🧪 State: {}", path.display());
            App::from_snapshot(&Snapshot::load_from_file(path)?)
        }
        None => {
            let config = Config::load(None)?;
            let catalog = catalog.or_else(|| config.catalog.clone());
            let mut app = App::new(config);
            request_catalog(&mut app, &task_sender, catalog).await;
            app
        }
    };

    let mut test_runner = TestRunner::from_file(script_path)?;
    test_runner.max_settle_time = Duration::from_secs(settle_timeout);
    test_runner.overwrite_mode = overwrite;
    test_runner.screenshot_base_dir = script_path.parent().map(Path::to_path_buf);

    log::info!(
        "🧪 Running test script with {} commands",
        test_runner.script.commands.len()
    );

    let test_result = test_runner.run(&mut app, result_receiver).await?;

    worker_handle.abort();

    test_result.print_summary();

    if test_result.success {
        log::info!("🧪 Test completed successfully");
        Ok(())
    } else {
        log::error!("🧪 Test failed");
        Err(SidebarError::Generic("Test failed".to_string()))
    }
}

async fn run_interactive(catalog: Option<PathBuf>, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let catalog = catalog.or_else(|| config.catalog.clone());
    let mut app = App::new(config);

    let (task_sender, mut result_receiver, worker_handle) = spawn_worker();
    request_catalog(&mut app, &task_sender, catalog).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &mut result_receiver);

    worker_handle.abort();

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    result_receiver: &mut mpsc::Receiver<TaskResult>,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    loop {
        if app.ui.force_redraw {
            terminal.clear()?;
            app.ui.force_redraw = false;
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if crossterm::event::poll(tick_rate)? {
            let event = crossterm::event::read()?;
            event::handle_event(event, app);
        }

        while let Ok(result) = result_receiver.try_recv() {
            log::debug!("📨 Received async task result");
            main_lib::handle_task_result(app, result);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
