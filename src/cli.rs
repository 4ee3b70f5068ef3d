use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docs-sidebar")]
#[command(about = "A terminal documentation sidebar with a keyboard-driven component finder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the interactive TUI (default)
    Run {
        /// Catalog JSON file (defaults to the builtin component list)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Settings file (defaults to $DOCS_SIDEBAR_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Generate a screenshot from a saved state file
    Screenshot {
        /// Path to the JSON state file
        #[arg(short, long)]
        state: PathBuf,
        /// Output file for the screenshot (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Terminal width for rendering
        #[arg(long, default_value = "120")]
        width: u16,
        /// Terminal height for rendering
        #[arg(long, default_value = "40")]
        height: u16,
    },
    /// Execute a command against a saved state and output the result
    Execute {
        /// Path to the JSON state file
        #[arg(short, long)]
        state: PathBuf,
        /// Command to execute (e.g., "/", "type:card", "down", "enter")
        #[arg(short = 'x', long)]
        command: String,
        /// Output file for the resulting state (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also generate a screenshot of the result
        #[arg(long)]
        screenshot: bool,
        /// Terminal width for screenshot (if enabled)
        #[arg(long, default_value = "120")]
        width: u16,
        /// Terminal height for screenshot (if enabled)
        #[arg(long, default_value = "40")]
        height: u16,
    },
    /// Save the initial state to JSON without running the TUI
    SaveState {
        /// Output file for the state (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Catalog JSON file (defaults to the builtin component list)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Settings file (defaults to $DOCS_SIDEBAR_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run a headless test script
    Test {
        /// Path to the test script
        #[arg(short, long)]
        script: PathBuf,
        /// Optional JSON state file to start from
        #[arg(long)]
        state: Option<PathBuf>,
        /// Catalog JSON file, loaded in the background like `run` does
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Maximum seconds to wait for background tasks to settle
        #[arg(long, default_value = "5")]
        settle_timeout: u64,
        /// Write screenshots instead of verifying them
        #[arg(long)]
        overwrite: bool,
        /// Debug logging on stderr
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            catalog: None,
            config: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_run() {
        let cli = Cli::try_parse_from(["docs-sidebar"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Commands::default());
    }

    #[test]
    fn test_execute_arguments() {
        let cli = Cli::try_parse_from([
            "docs-sidebar",
            "execute",
            "--state",
            "state.json",
            "-x",
            "type:card",
            "--screenshot",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Execute {
                state,
                command,
                screenshot,
                width,
                ..
            }) => {
                assert_eq!(state, PathBuf::from("state.json"));
                assert_eq!(command, "type:card");
                assert!(screenshot);
                assert_eq!(width, 120);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_script_is_required() {
        assert!(Cli::try_parse_from(["docs-sidebar", "test"]).is_err());
    }
}
