use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnipdeckError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Snippet '{0}' not found")]
    NotFound(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, SnipdeckError>;
