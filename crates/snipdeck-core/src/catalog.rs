//! What the picker shows: recently used snippets above the parsed groups.

use crate::models::{Snippet, SnippetGroup};
use serde::Serialize;

/// Section label used for the recency rows.
pub const RECENT_SECTION: &str = "Recently Used";

/// Message shown when the document yields no groups.
pub const EMPTY_CATALOG_MESSAGE: &str = "There are no valid snippets. Check the configuration.";

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub groups: Vec<SnippetGroup>,
    pub recent: Vec<Snippet>,
}

/// One selectable row of the picker.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub section: &'a str,
    pub recent: bool,
    pub snippet: &'a Snippet,
}

impl CatalogEntry<'_> {
    /// Text the search box matches against: `section/name/description`.
    pub fn search_key(&self) -> String {
        format!(
            "{}/{}/{}",
            self.section, self.snippet.name, self.snippet.description
        )
    }
}

impl Catalog {
    pub fn compose(groups: Vec<SnippetGroup>, recent: Vec<Snippet>) -> Self {
        Self { groups, recent }
    }

    /// True when the document produced no groups at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn entries(&self) -> Vec<CatalogEntry<'_>> {
        let recent = self.recent.iter().map(|snippet| CatalogEntry {
            section: RECENT_SECTION,
            recent: true,
            snippet,
        });

        let grouped = self.groups.iter().flat_map(|group| {
            group.snippets.iter().map(move |snippet| CatalogEntry {
                section: &group.name,
                recent: false,
                snippet,
            })
        });

        recent.chain(grouped).collect()
    }

    /// Rows whose search key contains every whitespace-separated term of
    /// `query`, ignoring case.
    pub fn filter(&self, query: &str) -> Vec<CatalogEntry<'_>> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

        self.entries()
            .into_iter()
            .filter(|entry| {
                let key = entry.search_key().to_lowercase();
                terms.iter().all(|term| key.contains(term.as_str()))
            })
            .collect()
    }

    /// First snippet called `name`, optionally restricted to groups called
    /// `group`.
    pub fn find(&self, group: Option<&str>, name: &str) -> Option<&Snippet> {
        self.groups
            .iter()
            .filter(|g| group.map_or(true, |wanted| g.name == wanted))
            .flat_map(|g| g.snippets.iter())
            .find(|s| s.name == name)
    }
}
