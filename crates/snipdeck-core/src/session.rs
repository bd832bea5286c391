use crate::catalog::Catalog;
use crate::config::{DOCUMENT_KEY, RECENT_KEY};
use crate::error::Result;
use crate::models::{Snippet, SnippetGroup};
use crate::parser::parse;
use crate::recency::RecencyCache;
use crate::storage::Store;
use serde_json::Value;
use std::sync::Arc;

/// Document, parsed groups and recency list of one picker session.
///
/// In-memory state only changes after the store accepted the write, so a
/// failed save leaves the session exactly as it was. The one exception is
/// the recency list after a saved document, which is always emptied.
pub struct Session {
    store: Arc<dyn Store>,
    document: String,
    groups: Vec<SnippetGroup>,
    recent: RecencyCache,
}

impl Session {
    /// Load the document and the recency list from `store`.
    pub async fn load(store: Arc<dyn Store>) -> Result<Self> {
        let document = store
            .load(DOCUMENT_KEY)
            .await?
            .as_ref()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let recent = RecencyCache::from_value(store.load(RECENT_KEY).await?.as_ref());
        let groups = parse(&document);

        tracing::info!(
            groups = groups.len(),
            recent = recent.len(),
            "loaded snippet session"
        );

        Ok(Self {
            store,
            document,
            groups,
            recent,
        })
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn groups(&self) -> &[SnippetGroup] {
        &self.groups
    }

    pub fn recent(&self) -> &[Snippet] {
        self.recent.current()
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::compose(self.groups.clone(), self.recent.current().to_vec())
    }

    /// Record `snippet` as the most recently used one.
    pub async fn select(&mut self, snippet: Snippet) -> Result<&[Snippet]> {
        let mut next = self.recent.clone();
        next.update(snippet);
        self.store.save(RECENT_KEY, next.to_value()).await?;

        self.recent = next;
        Ok(self.recent.current())
    }

    /// Persist a new document, re-parse it and drop the recency list.
    pub async fn save_document(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.store
            .save(DOCUMENT_KEY, Value::String(text.clone()))
            .await?;

        self.groups = parse(&text);
        self.document = text;
        tracing::info!(groups = self.groups.len(), "saved document");

        // Recent entries are copies of the old document's snippets and may
        // no longer exist. Drop them even if the store rejects the empty list.
        self.recent.clear();
        self.store
            .save(RECENT_KEY, RecencyCache::new().to_value())
            .await
    }

    pub async fn clear_recent(&mut self) -> Result<()> {
        self.store
            .save(RECENT_KEY, RecencyCache::new().to_value())
            .await?;
        self.recent.clear();
        Ok(())
    }
}
