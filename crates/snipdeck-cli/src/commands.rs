use crate::cli::Commands;
use crate::utils::{edit_text, format_catalog};
use chrono::Local;
use snipdeck_core::clipboard::set_clipboard_text;
use snipdeck_core::config::{format_elapsed, last_saved};
use snipdeck_core::{FileStore, Result, Session, Snippet, SnipdeckError};
use snipdeck_server::{get_api_server_port, start_api_server};
use snipdeck_ui::{run_picker, PickOutcome};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_command(command: Option<Commands>) -> Result<()> {
    let store = FileStore::open_default()?;
    let path = store.path().to_path_buf();
    let mut session = Session::load(Arc::new(store)).await?;

    match command.unwrap_or(Commands::Pick { query: None }) {
        Commands::Pick { query } => pick(&mut session, query.as_deref().unwrap_or_default()).await,
        Commands::List => {
            print!("{}", format_catalog(&session.catalog()));
            Ok(())
        }
        Commands::Show { name, group } => {
            let snippet = find_snippet(&session, group.as_deref(), &name)?;
            println!("{}", snippet.body);
            Ok(())
        }
        Commands::Copy { name, group } => {
            let snippet = find_snippet(&session, group.as_deref(), &name)?;
            copy_snippet(&mut session, snippet).await
        }
        Commands::Recent { clear } => {
            if clear {
                session.clear_recent().await?;
                println!("Recently used snippets cleared");
            } else if session.recent().is_empty() {
                println!("No recently used snippets");
            } else {
                for snippet in session.recent() {
                    println!("{}", snippet.name);
                }
            }
            Ok(())
        }
        Commands::Edit => edit_document(&mut session, edit_text).await,
        Commands::Import { file } => import_document(&mut session, &file).await,
        Commands::Config => {
            print!("{}", session.document());
            Ok(())
        }
        Commands::Path => {
            println!("Snippets stored in: {}", path.display());
            match last_saved() {
                Some(time) => println!("Last saved: {}", format_elapsed(time, Local::now())),
                None => println!("Nothing saved yet"),
            }
            if let Ok(port) = get_api_server_port() {
                println!("API server: http://127.0.0.1:{}", port);
            }
            Ok(())
        }
        Commands::Serve { port } => start_api_server(port, Arc::new(Mutex::new(session))).await,
    }
}

fn find_snippet(session: &Session, group: Option<&str>, name: &str) -> Result<Snippet> {
    session
        .catalog()
        .find(group, name)
        .cloned()
        .ok_or_else(|| match group {
            Some(group) => SnipdeckError::NotFound(format!("{}/{}", group, name)),
            None => SnipdeckError::NotFound(name.to_string()),
        })
}

async fn pick(session: &mut Session, query: &str) -> Result<()> {
    loop {
        match run_picker(&session.catalog(), query)? {
            PickOutcome::Selected(snippet) => return copy_snippet(session, snippet).await,
            PickOutcome::EditRequested => edit_from_picker(session, edit_text).await,
            PickOutcome::Cancelled => return Ok(()),
        }
    }
}

/// Edit the document on behalf of the picker. Failures are reported and the
/// picker reopens.
async fn edit_from_picker<F>(session: &mut Session, editor: F)
where
    F: FnOnce(&str) -> Result<String>,
{
    if let Err(e) = edit_document(session, editor).await {
        tracing::warn!(error = %e, "editing from the picker failed");
        eprintln!("Error: {}", e);
    }
}

async fn copy_snippet(session: &mut Session, snippet: Snippet) -> Result<()> {
    set_clipboard_text(&snippet.body)?;
    let name = snippet.name.clone();
    session.select(snippet).await?;
    println!("Copied '{}' to clipboard", name);
    Ok(())
}

async fn edit_document<F>(session: &mut Session, editor: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<String>,
{
    let text = editor(session.document())?;
    session.save_document(text).await?;
    report_saved(session);
    Ok(())
}

async fn import_document(session: &mut Session, file: &Path) -> Result<()> {
    let text = tokio::fs::read_to_string(file).await?;
    session.save_document(text).await?;
    report_saved(session);
    Ok(())
}

fn report_saved(session: &Session) {
    let snippets: usize = session.groups().iter().map(|g| g.snippets.len()).sum();
    println!(
        "Changes have been saved: {} groups, {} snippets",
        session.groups().len(),
        snippets
    );
    if session.groups().is_empty() {
        println!("{}", snipdeck_core::EMPTY_CATALOG_MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use snipdeck_core::config::DOCUMENT_KEY;
    use snipdeck_core::MemoryStore;

    const DOCUMENT: &str = "# General\n## Greeting\nHello there!\n";

    async fn session() -> Session {
        let store = MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT));
        Session::load(Arc::new(store)).await.unwrap()
    }

    #[tokio::test]
    async fn editor_failure_in_picker_keeps_document() {
        let mut session = session().await;

        edit_from_picker(&mut session, |_| {
            Err(SnipdeckError::Editor("Editor exited with status 1".to_string()))
        })
        .await;

        assert_eq!(session.document(), DOCUMENT);
        assert_eq!(session.groups()[0].name, "General");
    }

    #[tokio::test]
    async fn edit_from_picker_saves_edited_text() {
        let mut session = session().await;

        edit_from_picker(&mut session, |text| Ok(format!("{}## Farewell\nBye!\n", text))).await;

        assert_eq!(session.groups()[0].snippets.len(), 2);
        assert_eq!(session.groups()[0].snippets[1].name, "Farewell");
    }
}
