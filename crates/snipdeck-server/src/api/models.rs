//! Data models for API requests and responses.

use serde::{Deserialize, Serialize};
use snipdeck_core::{CatalogEntry, Snippet, SnippetGroup};

/// Standard API response format
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Catalog as returned by `GET /api/catalog`
#[derive(Serialize)]
pub struct CatalogView<'a> {
    pub groups: &'a [SnippetGroup],
    pub recent: &'a [Snippet],
    pub entries: Vec<CatalogEntry<'a>>,
    pub empty: bool,
}

/// Query string for `GET /api/catalog`
#[derive(Deserialize, Default)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Body of `GET`/`PUT /api/config`
#[derive(Serialize, Deserialize)]
pub struct ConfigPayload {
    pub config: String,
}
