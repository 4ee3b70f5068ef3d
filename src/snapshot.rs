use crate::app::{App, Focus};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialisable application state, used by `screenshot`, `execute`,
/// `save-state` and headless scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub catalog: Catalog,
    #[serde(default)]
    pub config: Config,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub selected_index: Option<usize>,
    #[serde(default = "default_focus")]
    pub focus: Focus,
    #[serde(default)]
    pub menu_cursor: usize,
    #[serde(default = "default_history")]
    pub history: Vec<String>,
    #[serde(default)]
    pub status_message: String,
}

fn default_focus() -> Focus {
    Focus::Body
}

fn default_history() -> Vec<String> {
    vec!["/".to_string()]
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            catalog: Catalog::builtin(),
            config: Config::default(),
            query: String::new(),
            selected_index: None,
            focus: Focus::Body,
            menu_cursor: 0,
            history: default_history(),
            status_message: "Ready".to_string(),
        }
    }
}

impl Snapshot {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn from_app(app: &App) -> Self {
        Snapshot {
            catalog: app.navigator.catalog().clone(),
            config: app.config.clone(),
            query: app.navigator.query().to_string(),
            selected_index: app.navigator.selected_index(),
            focus: app.ui.focus,
            menu_cursor: app.ui.menu_cursor,
            history: app.router.history().to_vec(),
            status_message: app.ui.status_message.clone(),
        }
    }
}
