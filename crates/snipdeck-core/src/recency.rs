use crate::config::RECENT_CAPACITY;
use crate::models::Snippet;
use serde_json::Value;

/// Most-recent-first list of selected snippets, deduplicated by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecencyCache {
    entries: Vec<Snippet>,
    capacity: usize,
}

impl Default for RecencyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyCache {
    pub fn new() -> Self {
        Self::with_capacity(RECENT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Rebuild a cache from a stored value.
    ///
    /// Anything that is not an array yields an empty cache. Entries that are
    /// not objects are skipped, later duplicates of a name are dropped and the
    /// list is cut to capacity.
    pub fn from_value(value: Option<&Value>) -> Self {
        let mut cache = Self::new();
        let Some(records) = value.and_then(Value::as_array) else {
            return cache;
        };

        for snippet in records.iter().filter_map(Snippet::from_value) {
            if cache.entries.len() == cache.capacity {
                break;
            }
            if !cache.entries.iter().any(|s| s.name == snippet.name) {
                cache.entries.push(snippet);
            }
        }

        if cache.entries.len() != records.len() {
            tracing::debug!(
                stored = records.len(),
                kept = cache.entries.len(),
                "sanitized stored recent snippets"
            );
        }
        cache
    }

    pub fn to_value(&self) -> Value {
        Value::Array(
            self.entries
                .iter()
                .map(|s| serde_json::to_value(s).unwrap_or(Value::Null))
                .collect(),
        )
    }

    /// Move `snippet` to the head, replacing any entry with the same name.
    pub fn update(&mut self, snippet: Snippet) -> &[Snippet] {
        self.entries.retain(|s| s.name != snippet.name);
        self.entries.insert(0, snippet);
        self.entries.truncate(self.capacity);
        &self.entries
    }

    pub fn current(&self) -> &[Snippet] {
        &self.entries
    }

    pub fn clear(&mut self) -> &[Snippet] {
        self.entries.clear();
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
