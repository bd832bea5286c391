use snipdeck_core::{Catalog, Result, Snippet, SnipdeckError, EMPTY_CATALOG_MESSAGE, RECENT_SECTION};
use std::env;
use std::fmt::Write as _;
use std::io::Write as _;
use std::process::Command;

fn snippet_line(out: &mut String, snippet: &Snippet) {
    if snippet.description.is_empty() {
        let _ = writeln!(out, "  {}", snippet.name);
    } else {
        let _ = writeln!(out, "  {} - {}", snippet.name, snippet.description);
    }
}

/// Plain-text rendering of the catalog: recent snippets first, then groups.
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();

    if !catalog.recent.is_empty() {
        let _ = writeln!(out, "{}", RECENT_SECTION);
        for snippet in &catalog.recent {
            snippet_line(&mut out, snippet);
        }
        out.push('\n');
    }

    if catalog.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_CATALOG_MESSAGE);
        return out;
    }

    for group in &catalog.groups {
        let _ = writeln!(out, "{}", group.name);
        if group.snippets.is_empty() {
            let _ = writeln!(out, "  (no snippets)");
        }
        for snippet in &group.snippets {
            snippet_line(&mut out, snippet);
        }
        out.push('\n');
    }

    out
}

/// Editor command from `$VISUAL`, then `$EDITOR`, then `vi`.
pub fn editor_command() -> String {
    ["VISUAL", "EDITOR"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Let the user edit `text` in their editor and return the result.
pub fn edit_text(text: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("snipdeck-")
        .suffix(".md")
        .tempfile()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;

    let editor = editor_command();
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| SnipdeckError::Editor("no editor configured".to_string()))?;

    tracing::debug!(%editor, path = %file.path().display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .map_err(|e| SnipdeckError::Editor(format!("failed to launch '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(SnipdeckError::Editor(format!(
            "'{}' exited with {}",
            editor, status
        )));
    }

    Ok(std::fs::read_to_string(file.path())?)
}
