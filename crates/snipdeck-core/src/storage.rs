//! Key/value persistence used by the session.
//!
//! [`FileStore`] keeps every key in one JSON object on disk. [`MemoryStore`]
//! keeps them in a map and is what the tests run against.

use crate::config::{ensure_config_dir, get_store_file_path};
use crate::error::{Result, SnipdeckError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tempfile::NamedTempFile;

#[async_trait]
pub trait Store: Send + Sync {
    /// Value stored under `key`, or `None` when nothing was ever saved.
    async fn load(&self, key: &str) -> Result<Option<Value>>;

    async fn save(&self, key: &str, value: Value) -> Result<()>;
}

/// All keys in a single pretty-printed JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location inside the config directory.
    pub fn open_default() -> Result<Self> {
        ensure_config_dir()?;
        Ok(Self::new(get_store_file_path()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Map<String, Value>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        // Handle empty store file
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(SnipdeckError::Storage(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    async fn write_all(&self, map: Map<String, Value>) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&Value::Object(map))?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_replacing(&path, serialized.as_bytes()))
            .await
            .map_err(|e| SnipdeckError::Storage(format!("write task failed: {}", e)))?
    }
}

/// Write `contents` next to `path` and rename it into place.
fn write_replacing(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;
    file.persist(path).map_err(|e| SnipdeckError::Io(e.error))?;
    Ok(())
}

#[async_trait]
impl Store for FileStore {
    async fn load(&self, key: &str) -> Result<Option<Value>> {
        let mut map = self.read_all().await?;
        Ok(map.remove(key))
    }

    async fn save(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_all().await?;
        map.insert(key.to_string(), value);
        self.write_all(map).await?;
        tracing::debug!(key, path = %self.path.display(), "saved key");
        Ok(())
    }
}

/// In-process store, optionally failing every save.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
    fail_saves: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.lock().insert(key.to_string(), value);
        self
    }

    /// Make subsequent saves fail with a storage error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        // A poisoned map is still a valid map.
        self.values.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.get(key))
    }

    async fn save(&self, key: &str, value: Value) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(SnipdeckError::Storage(format!("save of '{}' rejected", key)));
        }
        self.lock().insert(key.to_string(), value);
        Ok(())
    }
}
