use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::fs;
use std::path::Path;

use crate::{app::App, error::Result, snapshot::Snapshot, ui};

pub fn generate_screenshot(
    snapshot_path: &Path,
    output_path: Option<&Path>,
    width: u16,
    height: u16,
) -> Result<()> {
    let snapshot = Snapshot::load_from_file(snapshot_path)?;
    let app = App::from_snapshot(&snapshot);

    let screenshot = render_to_string(&app, width, height)?;

    match output_path {
        Some(path) => {
            fs::write(path, screenshot)?;
            println!("Screenshot saved to: {}", path.display());
        }
        None => {
            print!("{}", screenshot);
        }
    }

    Ok(())
}

/// Render one frame of `app` into an off-screen buffer.
pub fn render_to_string(app: &App, width: u16, height: u16) -> Result<String> {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend)?;

    terminal.draw(|frame| {
        ui::draw(frame, app);
    })?;

    Ok(buffer_to_string(terminal.backend().buffer()))
}

pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();

    for y in 0..buffer.area().height {
        for x in 0..buffer.area().width {
            let cell = &buffer[(x, y)];
            let sym = cell.symbol();

            // Use a space for empty cells to make output more readable
            if sym.is_empty() {
                result.push(' ');
            } else {
                result.push_str(sym);
            }
        }
        result.push('\n');
    }

    result
}
