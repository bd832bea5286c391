use async_trait::async_trait;
use serde_json::{json, Value};
use snipdeck_core::config::{DOCUMENT_KEY, RECENT_KEY};
use snipdeck_core::{FileStore, MemoryStore, Result, Session, Snippet, SnipdeckError, Store};
use std::sync::Arc;
use tempfile::TempDir;

const DOCUMENT: &str = "# General\n## Greeting\nA friendly greeting\nHello there!\n\n## Farewell\nBye!\n";

#[tokio::test]
async fn empty_store_loads_empty_session() {
    let session = Session::load(Arc::new(MemoryStore::new())).await.unwrap();

    assert_eq!(session.document(), "");
    assert!(session.catalog().is_empty());
    assert!(session.recent().is_empty());
}

#[tokio::test]
async fn load_parses_document_and_sanitizes_recent() {
    let store = MemoryStore::new()
        .with_value(DOCUMENT_KEY, json!(DOCUMENT))
        .with_value(RECENT_KEY, json!([{ "name": "Greeting" }, "junk"]));

    let session = Session::load(Arc::new(store)).await.unwrap();
    let catalog = session.catalog();

    assert_eq!(catalog.groups.len(), 1);
    assert_eq!(catalog.groups[0].snippets.len(), 2);
    assert_eq!(catalog.recent, vec![Snippet::new("Greeting", "", "")]);
}

#[tokio::test]
async fn non_string_document_is_treated_as_empty() {
    let store = MemoryStore::new().with_value(DOCUMENT_KEY, json!({ "oops": true }));
    let session = Session::load(Arc::new(store)).await.unwrap();
    assert_eq!(session.document(), "");
}

#[tokio::test]
async fn select_persists_recent_list() {
    let store = Arc::new(MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT)));
    let mut session = Session::load(store.clone()).await.unwrap();

    let greeting = session.groups()[0].snippets[0].clone();
    let farewell = session.groups()[0].snippets[1].clone();
    session.select(greeting.clone()).await.unwrap();
    let recent = session.select(farewell.clone()).await.unwrap().to_vec();

    assert_eq!(recent, vec![farewell.clone(), greeting.clone()]);
    assert_eq!(
        store.get(RECENT_KEY),
        Some(serde_json::to_value(vec![farewell, greeting]).unwrap())
    );
}

#[tokio::test]
async fn failed_select_leaves_state_unchanged() {
    let store = Arc::new(MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT)));
    let mut session = Session::load(store.clone()).await.unwrap();
    session.select(Snippet::new("A", "", "a")).await.unwrap();

    store.set_fail_saves(true);
    let result = session.select(Snippet::new("B", "", "b")).await;

    assert!(matches!(result, Err(SnipdeckError::Storage(_))));
    assert_eq!(session.recent(), &[Snippet::new("A", "", "a")]);
}

#[tokio::test]
async fn saving_document_reparses_and_clears_recent() {
    let store = Arc::new(MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT)));
    let mut session = Session::load(store.clone()).await.unwrap();
    session.select(Snippet::new("Greeting", "", "Hello")).await.unwrap();

    session
        .save_document("# Other\n## Thanks\nThank you!\n")
        .await
        .unwrap();

    assert!(session.recent().is_empty());
    assert_eq!(store.get(RECENT_KEY), Some(json!([])));
    assert_eq!(
        store.get(DOCUMENT_KEY),
        Some(json!("# Other\n## Thanks\nThank you!\n"))
    );
    assert_eq!(session.groups()[0].name, "Other");
}

#[tokio::test]
async fn unchanged_save_still_clears_recent() {
    let store = Arc::new(MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT)));
    let mut session = Session::load(store.clone()).await.unwrap();
    session.select(Snippet::new("Greeting", "", "Hello")).await.unwrap();

    session.save_document(DOCUMENT).await.unwrap();
    assert!(session.recent().is_empty());
}

#[tokio::test]
async fn failed_document_save_keeps_previous_state() {
    let store = Arc::new(MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT)));
    let mut session = Session::load(store.clone()).await.unwrap();
    session.select(Snippet::new("Greeting", "", "Hello")).await.unwrap();

    store.set_fail_saves(true);
    assert!(session.save_document("# Replaced\n").await.is_err());

    assert_eq!(session.document(), DOCUMENT);
    assert_eq!(session.groups()[0].name, "General");
    assert_eq!(session.recent().len(), 1);
}

/// Accepts every write except the recency list.
struct RecentRejectingStore {
    inner: MemoryStore,
}

#[async_trait]
impl Store for RecentRejectingStore {
    async fn load(&self, key: &str) -> Result<Option<Value>> {
        self.inner.load(key).await
    }

    async fn save(&self, key: &str, value: Value) -> Result<()> {
        if key == RECENT_KEY {
            return Err(SnipdeckError::Storage("recent list rejected".to_string()));
        }
        self.inner.save(key, value).await
    }
}

#[tokio::test]
async fn saved_document_drops_recent_even_when_clearing_fails() {
    let inner = MemoryStore::new()
        .with_value(DOCUMENT_KEY, json!(DOCUMENT))
        .with_value(RECENT_KEY, json!([{ "name": "A", "body": "old body" }]));
    let store = Arc::new(RecentRejectingStore { inner });
    let mut session = Session::load(store.clone()).await.unwrap();
    assert_eq!(session.recent().len(), 1);

    let result = session.save_document("# New\n## B\nnew\n").await;

    assert!(matches!(result, Err(SnipdeckError::Storage(_))));
    assert_eq!(session.document(), "# New\n## B\nnew\n");
    assert_eq!(session.groups()[0].name, "New");
    assert!(session.recent().is_empty());
    assert!(session.catalog().recent.is_empty());
    assert_eq!(
        store.inner.get(DOCUMENT_KEY),
        Some(json!("# New\n## B\nnew\n"))
    );
}

#[tokio::test]
async fn file_store_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snipdeck.json");

    let mut session = Session::load(Arc::new(FileStore::new(&path))).await.unwrap();
    session.save_document(DOCUMENT).await.unwrap();
    let greeting = session.groups()[0].snippets[0].clone();
    session.select(greeting.clone()).await.unwrap();

    let reloaded = Session::load(Arc::new(FileStore::new(&path))).await.unwrap();
    assert_eq!(reloaded.document(), DOCUMENT);
    assert_eq!(reloaded.recent(), &[greeting]);

    let store = FileStore::new(&path);
    assert_eq!(store.load(DOCUMENT_KEY).await.unwrap(), Some(json!(DOCUMENT)));
}
