use crate::error::{Result, SidebarError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "DOCS_SIDEBAR_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub keybindings: KeybindingConfig,
    /// Catalog JSON file; the built-in catalog is used when unset.
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub sidebar_width: u16,
    pub hide_empty_groups: bool,
    pub show_getting_started: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub focus_search: char,
    pub quit: char,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sidebar_width: 34,
            hide_empty_groups: false,
            show_getting_started: true,
        }
    }
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            focus_search: '/',
            quit: 'q',
        }
    }
}

impl Config {
    /// Load from `path`, else from `$DOCS_SIDEBAR_CONFIG`, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load_from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SidebarError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            SidebarError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.layout.sidebar_width < 20 {
            return Err(SidebarError::Config(format!(
                "sidebar_width must be at least 20, got {}",
                self.layout.sidebar_width
            )));
        }
        if self.keybindings.focus_search == self.keybindings.quit {
            return Err(SidebarError::Config(
                "focus_search and quit must be different keys".to_string(),
            ));
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.keybindings.focus_search, '/');
        assert_eq!(config.layout.sidebar_width, 34);
        assert!(!config.layout.hide_empty_groups);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"layout": {"hide_empty_groups": true}}"#).unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.layout.hide_empty_groups);
        assert_eq!(config.layout.sidebar_width, 34);
        assert_eq!(config.keybindings.quit, 'q');
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, SidebarError::Config(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"keybindings": {"focus_search": "q"}}"#).unwrap();
        assert!(Config::load(Some(&path)).is_err());

        std::fs::write(&path, r#"{"layout": {"sidebar_width": 5}}"#).unwrap();
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.catalog = Some(PathBuf::from("catalog.json"));
        config.save(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }
}
