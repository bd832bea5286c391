use crate::error::{Result, SnipdeckError};
use arboard::Clipboard;

/// Put a snippet body on the system clipboard
pub fn set_clipboard_text(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().map_err(|e| SnipdeckError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| SnipdeckError::Clipboard(e.to_string()))
}
