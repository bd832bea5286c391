//! HTTP server implementation for the snipdeck API.

use crate::api::{
    clear_recent, get_catalog, get_config, get_recent, save_config, select_snippet,
    CatalogQuery, ConfigPayload,
};
use crate::server::utils::{remove_api_port, save_api_port};

use snipdeck_core::{Result, Session, SnipdeckError, Snippet};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use warp::Filter;

/// Session shared by all request handlers
pub type SharedSession = Arc<Mutex<Session>>;

/// Largest accepted request body
const MAX_BODY_BYTES: u64 = 1024 * 1024;

fn with_session(
    session: SharedSession,
) -> impl Filter<Extract = (SharedSession,), Error = Infallible> + Clone {
    warp::any().map(move || session.clone())
}

/// All API routes over `session`
pub fn routes(
    session: SharedSession,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    // CORS for browser front-ends
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["Content-Type"])
        .allow_methods(vec!["GET", "POST", "DELETE", "PUT"]);

    let catalog_route = warp::path!("api" / "catalog")
        .and(warp::get())
        .and(warp::query::<CatalogQuery>())
        .and(with_session(session.clone()))
        .and_then(|query: CatalogQuery, session: SharedSession| async move {
            let session = session.lock().await;
            Ok::<_, Infallible>(get_catalog(&session, &query))
        });

    let get_config_route = warp::path!("api" / "config")
        .and(warp::get())
        .and(with_session(session.clone()))
        .and_then(|session: SharedSession| async move {
            let session = session.lock().await;
            Ok::<_, Infallible>(warp::reply::json(&get_config(&session)))
        });

    let save_config_route = warp::path!("api" / "config")
        .and(warp::put())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_session(session.clone()))
        .and_then(|body: ConfigPayload, session: SharedSession| async move {
            let mut session = session.lock().await;
            let response = save_config(&mut session, body).await;
            Ok::<_, Infallible>(warp::reply::json(&response))
        });

    let select_route = warp::path!("api" / "select")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(with_session(session.clone()))
        .and_then(|snippet: Snippet, session: SharedSession| async move {
            let mut session = session.lock().await;
            let response = select_snippet(&mut session, snippet).await;
            Ok::<_, Infallible>(warp::reply::json(&response))
        });

    let get_recent_route = warp::path!("api" / "recent")
        .and(warp::get())
        .and(with_session(session.clone()))
        .and_then(|session: SharedSession| async move {
            let session = session.lock().await;
            Ok::<_, Infallible>(warp::reply::json(&get_recent(&session)))
        });

    let clear_recent_route = warp::path!("api" / "recent")
        .and(warp::delete())
        .and(with_session(session))
        .and_then(|session: SharedSession| async move {
            let mut session = session.lock().await;
            let response = clear_recent(&mut session).await;
            Ok::<_, Infallible>(warp::reply::json(&response))
        });

    // Health check endpoint
    let health_route = warp::path!("health").map(|| "snipdeck API is running");

    catalog_route
        .or(get_config_route)
        .or(save_config_route)
        .or(select_route)
        .or(get_recent_route)
        .or(clear_recent_route)
        .or(health_route)
        .with(cors)
        .with(warp::trace::request())
}

/// Start the HTTP API server on the specified port
pub async fn start_api_server(port: u16, session: SharedSession) -> Result<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let server = warp::serve(routes(session)).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("received shutdown signal, stopping API server");
    });

    match server {
        Ok((addr, server)) => {
            // Save the port to file so we can find it later
            save_api_port(addr.port())?;
            println!("snipdeck API listening on http://{}", addr);
            tracing::info!(%addr, "API server started");

            server.await;
            remove_api_port()
        }
        Err(e) => Err(SnipdeckError::Server(format!(
            "Failed to bind to port {}: {}",
            port, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use snipdeck_core::config::{DOCUMENT_KEY, RECENT_KEY};
    use snipdeck_core::MemoryStore;

    const DOCUMENT: &str =
        "# General\n## Greeting\nA friendly greeting\nHello there!\n# Code\n## Review\nPlease review.\n";

    async fn session_with(store: Arc<MemoryStore>) -> SharedSession {
        Arc::new(Mutex::new(Session::load(store).await.unwrap()))
    }

    fn body(response: &warp::http::Response<warp::hyper::body::Bytes>) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[tokio::test]
    async fn catalog_lists_groups_and_filters_entries() {
        let store = Arc::new(MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT)));
        let api = routes(session_with(store).await);

        let response = warp::test::request()
            .method("GET")
            .path("/api/catalog?q=greet")
            .reply(&api)
            .await;
        assert_eq!(response.status(), 200);

        let value = body(&response);
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["groups"].as_array().unwrap().len(), 2);
        assert_eq!(value["data"]["empty"], json!(false));
        let entries = value["data"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["section"], json!("General"));
        assert_eq!(entries[0]["snippet"]["body"], json!("Hello there!"));
    }

    #[tokio::test]
    async fn catalog_without_query_returns_all_entries() {
        let store = Arc::new(MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT)));
        let api = routes(session_with(store).await);

        let response = warp::test::request().path("/api/catalog").reply(&api).await;
        assert_eq!(body(&response)["data"]["entries"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn select_then_save_clears_recent() {
        let store = Arc::new(MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT)));
        let api = routes(session_with(store.clone()).await);

        let response = warp::test::request()
            .method("POST")
            .path("/api/select")
            .json(&json!({ "name": "Review", "description": "", "body": "Please review." }))
            .reply(&api)
            .await;
        assert_eq!(body(&response)["data"][0]["name"], json!("Review"));
        assert_eq!(store.get(RECENT_KEY).unwrap().as_array().unwrap().len(), 1);

        let response = warp::test::request()
            .method("PUT")
            .path("/api/config")
            .json(&json!({ "config": "# Only\n## One\nbody\n" }))
            .reply(&api)
            .await;
        let value = body(&response);
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"]["groups"][0]["name"], json!("Only"));
        assert_eq!(value["data"]["recent"], json!([]));
        assert_eq!(store.get(RECENT_KEY), Some(json!([])));

        let response = warp::test::request().path("/api/config").reply(&api).await;
        assert_eq!(
            body(&response)["data"]["config"],
            json!("# Only\n## One\nbody\n")
        );
    }

    #[tokio::test]
    async fn storage_failure_is_reported_in_envelope() {
        let store = Arc::new(MemoryStore::new().with_value(DOCUMENT_KEY, json!(DOCUMENT)));
        let api = routes(session_with(store.clone()).await);
        store.set_fail_saves(true);

        let response = warp::test::request()
            .method("POST")
            .path("/api/select")
            .json(&json!({ "name": "Review", "body": "Please review." }))
            .reply(&api)
            .await;
        let value = body(&response);
        assert_eq!(value["success"], json!(false));
        assert!(value["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to record selection"));

        let response = warp::test::request().path("/api/recent").reply(&api).await;
        assert_eq!(body(&response)["data"], json!([]));
    }

    #[tokio::test]
    async fn delete_recent_empties_list() {
        let store = Arc::new(
            MemoryStore::new()
                .with_value(DOCUMENT_KEY, json!(DOCUMENT))
                .with_value(RECENT_KEY, json!([{ "name": "A", "description": "", "body": "a" }])),
        );
        let api = routes(session_with(store.clone()).await);

        let response = warp::test::request()
            .method("DELETE")
            .path("/api/recent")
            .reply(&api)
            .await;
        assert_eq!(body(&response)["success"], json!(true));
        assert_eq!(store.get(RECENT_KEY), Some(json!([])));
    }

    #[tokio::test]
    async fn health_check() {
        let api = routes(session_with(Arc::new(MemoryStore::new())).await);
        let response = warp::test::request().path("/health").reply(&api).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.body().as_ref(), b"snipdeck API is running");
    }
}
