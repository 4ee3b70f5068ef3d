//! Query filter over catalog entries.
//!
//! Ranking is two-tier: entries whose display name starts with the query come
//! first, followed by entries that only contain it. Both tiers keep catalog
//! order and never overlap. Matching is case-insensitive and the query is
//! always taken literally.

use crate::catalog::Entry;
use regex::{Regex, RegexBuilder};

/// Compiled matcher for one query string
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    mode: MatchMode,
}

#[derive(Debug, Clone)]
enum MatchMode {
    Regex { prefix: Regex, contains: Regex },
    // Only reached when the escaped query exceeds the regex size limit.
    Literal { needle: String },
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        let escaped = regex::escape(query);
        let prefix = RegexBuilder::new(&format!("^{}", escaped))
            .case_insensitive(true)
            .build();
        let contains = RegexBuilder::new(&escaped).case_insensitive(true).build();

        let mode = match (prefix, contains) {
            (Ok(prefix), Ok(contains)) => MatchMode::Regex { prefix, contains },
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Filter: falling back to literal matching: {}", e);
                MatchMode::Literal {
                    needle: query.to_lowercase(),
                }
            }
        };

        Self { mode }
    }

    pub fn starts_with(&self, name: &str) -> bool {
        match &self.mode {
            MatchMode::Regex { prefix, .. } => prefix.is_match(name),
            MatchMode::Literal { needle } => name.to_lowercase().starts_with(needle.as_str()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        match &self.mode {
            MatchMode::Regex { contains, .. } => contains.is_match(name),
            MatchMode::Literal { needle } => name.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Indices of matching entries, prefix matches first.
pub fn candidate_indices(entries: &[Entry], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..entries.len()).collect();
    }

    let matcher = QueryMatcher::new(query);
    let (starts_with, rest): (Vec<usize>, Vec<usize>) = (0..entries.len())
        .partition(|&i| matcher.starts_with(&entries[i].display_name));
    let contains = rest
        .into_iter()
        .filter(|&i| matcher.contains(&entries[i].display_name));

    let ranked: Vec<usize> = starts_with.into_iter().chain(contains).collect();
    log::debug!(
        "Filter: query '{}' matched {} of {} entries",
        query,
        ranked.len(),
        entries.len()
    );
    ranked
}

/// Ranked entries for `query`. An empty query returns every entry.
pub fn filter<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    candidate_indices(entries, query)
        .into_iter()
        .map(|i| &entries[i])
        .collect()
}
