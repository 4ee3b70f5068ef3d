//! Category grouping for the unfiltered menu, plus the static links shown
//! above it.

use crate::catalog::{Catalog, Entry};

#[derive(Debug, Clone, PartialEq)]
pub struct MenuGroup<'a> {
    pub category: &'a str,
    pub heading: String,
    pub entries: Vec<&'a Entry>,
}

/// Group entries by category in `order`. Categories with no entries still
/// produce a group; categories missing from `order` are dropped.
pub fn group<'a>(entries: &'a [Entry], order: &'a [String]) -> Vec<MenuGroup<'a>> {
    order
        .iter()
        .map(|category| MenuGroup {
            category: category.as_str(),
            heading: heading_for(category),
            entries: entries.iter().filter(|e| &e.category == category).collect(),
        })
        .collect()
}

/// `element` -> `Elements`
pub fn heading_for(category: &str) -> String {
    let lower = category.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => format!("{}{}s", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Internal(String),
    External(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLink {
    pub label: String,
    pub target: LinkTarget,
}

/// The "Getting Started" section.
pub fn getting_started_links(catalog: &Catalog) -> Vec<StaticLink> {
    let internal = |label: &str, path: &str| StaticLink {
        label: label.to_string(),
        target: LinkTarget::Internal(path.to_string()),
    };
    let mut links = vec![
        internal("Introduction", "/"),
        internal("Usage", "/usage"),
        internal("Theming", "/theming"),
        internal("Layouts", "/layouts"),
    ];
    if !catalog.repo_url.is_empty() {
        links.push(StaticLink {
            label: "GitHub".to_string(),
            target: LinkTarget::External(catalog.repo_url.clone()),
        });
        links.push(StaticLink {
            label: "CHANGELOG".to_string(),
            target: LinkTarget::External(catalog.changelog_url()),
        });
    }
    links
}
