pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod models;
pub mod parser;
pub mod recency;
pub mod session;
pub mod storage;

// Re-export common items for convenience
pub use catalog::{Catalog, CatalogEntry, EMPTY_CATALOG_MESSAGE, RECENT_SECTION};
pub use config::{get_config_dir, RECENT_CAPACITY};
pub use error::{Result, SnipdeckError};
pub use models::{Snippet, SnippetGroup};
pub use parser::parse;
pub use recency::RecencyCache;
pub use session::Session;
pub use storage::{FileStore, MemoryStore, Store};
