use crate::error::Result;
use chrono::{DateTime, Local};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Storage key holding the raw document text.
pub const DOCUMENT_KEY: &str = "config";
/// Storage key holding the persisted recency list.
pub const RECENT_KEY: &str = "recentSnippets";
/// Maximum number of entries kept in the recency list.
pub const RECENT_CAPACITY: usize = 3;

pub const STORE_FILENAME: &str = "snipdeck.json";
pub const PORT_FILENAME: &str = "api_port.txt";
pub const HOME_ENV: &str = "SNIPDECK_HOME";

/// Get the snipdeck configuration directory
///
/// `$SNIPDECK_HOME` wins when set, otherwise `$HOME/.snipdeck`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = env::var(HOME_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".snipdeck"))
        .unwrap_or_else(|_| PathBuf::from(".snipdeck"))
}

/// Ensure the configuration directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let config_dir = get_config_dir();
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
        tracing::debug!(path = %config_dir.display(), "created config directory");
    }
    Ok(config_dir)
}

/// Get the path to the store file
pub fn get_store_file_path() -> PathBuf {
    get_config_dir().join(STORE_FILENAME)
}

/// Get the path to the file recording the API server port
pub fn get_port_file_path() -> PathBuf {
    get_config_dir().join(PORT_FILENAME)
}

/// Last modification time of the store file, if it exists
pub fn last_saved() -> Option<DateTime<Local>> {
    let modified = fs::metadata(get_store_file_path()).ok()?.modified().ok()?;
    Some(DateTime::<Local>::from(modified))
}

/// Render how long ago `time` was, relative to `now`.
pub fn format_elapsed(time: DateTime<Local>, now: DateTime<Local>) -> String {
    let duration = now.signed_duration_since(time);

    if duration.num_seconds() < 60 {
        format!("{}s ago", duration.num_seconds().max(0))
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else {
        format!("{}d ago", duration.num_days())
    }
}
