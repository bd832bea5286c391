use crate::api::models::{ApiResponse, CatalogQuery, CatalogView, ConfigPayload};
use snipdeck_core::{Catalog, Session, Snippet};
use warp::reply::Json;

/// Catalog with the picker rows matching the optional query
pub fn get_catalog(session: &Session, query: &CatalogQuery) -> Json {
    let catalog = session.catalog();
    let view = CatalogView {
        groups: &catalog.groups,
        recent: &catalog.recent,
        entries: catalog.filter(query.q.as_deref().unwrap_or_default()),
        empty: catalog.is_empty(),
    };
    warp::reply::json(&ApiResponse::success(view))
}

/// Get the raw document
pub fn get_config(session: &Session) -> ApiResponse<ConfigPayload> {
    ApiResponse::success(ConfigPayload {
        config: session.document().to_string(),
    })
}

/// Save the document; this also clears the recent list
pub async fn save_config(session: &mut Session, payload: ConfigPayload) -> ApiResponse<Catalog> {
    match session.save_document(payload.config).await {
        Ok(()) => ApiResponse::success(session.catalog()),
        Err(e) => ApiResponse::error(format!("Failed to save configuration: {}", e)),
    }
}

/// Record a snippet selection
pub async fn select_snippet(session: &mut Session, snippet: Snippet) -> ApiResponse<Vec<Snippet>> {
    match session.select(snippet).await {
        Ok(recent) => ApiResponse::success(recent.to_vec()),
        Err(e) => ApiResponse::error(format!("Failed to record selection: {}", e)),
    }
}

/// Get recently used snippets
pub fn get_recent(session: &Session) -> ApiResponse<Vec<Snippet>> {
    ApiResponse::success(session.recent().to_vec())
}

/// Forget recently used snippets
pub async fn clear_recent(session: &mut Session) -> ApiResponse<()> {
    match session.clear_recent().await {
        Ok(()) => ApiResponse::success(()),
        Err(e) => ApiResponse::error(format!("Failed to clear recent snippets: {}", e)),
    }
}
