//! Component catalog: the entry list the sidebar filters and groups.
//!
//! A catalog is either read from a JSON file or taken from the built-in
//! component set. Display names must be unique within one catalog since
//! they identify entries for activation and rendering.

use crate::error::{Result, SidebarError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One documented component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    pub display_name: String,
    pub category: String,
}

impl Entry {
    pub fn new(display_name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub title: String,
    pub version: String,
    #[serde(default)]
    pub repo_url: String,
    pub category_order: Vec<String>,
    pub entries: Vec<Entry>,
}

const BUILTIN_CATEGORIES: &[&str] = &["element", "collection", "view", "module", "behavior", "addon"];

const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("Button", "element"),
    ("Container", "element"),
    ("Divider", "element"),
    ("Flag", "element"),
    ("Header", "element"),
    ("Icon", "element"),
    ("Image", "element"),
    ("Input", "element"),
    ("Label", "element"),
    ("List", "element"),
    ("Loader", "element"),
    ("Placeholder", "element"),
    ("Rail", "element"),
    ("Reveal", "element"),
    ("Segment", "element"),
    ("Step", "element"),
    ("Breadcrumb", "collection"),
    ("Form", "collection"),
    ("Grid", "collection"),
    ("Menu", "collection"),
    ("Message", "collection"),
    ("Table", "collection"),
    ("Advertisement", "view"),
    ("Card", "view"),
    ("Comment", "view"),
    ("Feed", "view"),
    ("Item", "view"),
    ("Statistic", "view"),
    ("Accordion", "module"),
    ("Checkbox", "module"),
    ("Dimmer", "module"),
    ("Dropdown", "module"),
    ("Embed", "module"),
    ("Modal", "module"),
    ("Popup", "module"),
    ("Progress", "module"),
    ("Rating", "module"),
    ("Search", "module"),
    ("Sidebar", "module"),
    ("Sticky", "module"),
    ("Tab", "module"),
    ("Transition", "module"),
    ("Visibility", "behavior"),
    ("Confirm", "addon"),
    ("Pagination", "addon"),
    ("Portal", "addon"),
    ("Radio", "addon"),
    ("Ref", "addon"),
    ("Responsive", "addon"),
    ("Select", "addon"),
    ("TextArea", "addon"),
    ("TransitionablePortal", "addon"),
];

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// An empty catalog, used while the real one is still loading.
    pub fn empty() -> Self {
        Self {
            title: "Semantic UI React".to_string(),
            version: String::new(),
            repo_url: String::new(),
            category_order: BUILTIN_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            entries: Vec::new(),
        }
    }

    pub fn builtin() -> Self {
        Self {
            title: "Semantic UI React".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            repo_url: "https://github.com/Semantic-Org/Semantic-UI-React".to_string(),
            category_order: BUILTIN_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            entries: BUILTIN_ENTRIES
                .iter()
                .map(|(name, category)| Entry::new(*name, *category))
                .collect(),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        log::info!(
            "Loaded catalog '{}' {} with {} entries from {}",
            catalog.title,
            catalog.version,
            catalog.entries.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.display_name.is_empty() {
                return Err(SidebarError::Catalog("entry with empty display name".to_string()));
            }
            if !seen.insert(entry.display_name.as_str()) {
                return Err(SidebarError::Catalog(format!(
                    "duplicate display name: {}",
                    entry.display_name
                )));
            }
        }
        Ok(())
    }

    pub fn find(&self, display_name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.display_name == display_name)
    }

    pub fn changelog_url(&self) -> String {
        format!("{}/blob/master/CHANGELOG.md", self.repo_url)
    }
}
