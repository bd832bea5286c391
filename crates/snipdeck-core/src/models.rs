use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named piece of reusable text.
///
/// `name` is the identity used by the recency list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Snippet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub body: String,
}

impl Snippet {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            body: body.into(),
        }
    }

    /// Build a snippet from a loosely-typed stored record.
    ///
    /// Returns `None` when the value is not an object. Missing or non-string
    /// fields become empty strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        let record = value.as_object()?;
        let field = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Some(Self {
            name: field("name"),
            description: field("description"),
            body: field("body"),
        })
    }
}

/// A named, ordered section of snippets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SnippetGroup {
    pub name: String,
    pub snippets: Vec<Snippet>,
}

impl SnippetGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            snippets: Vec::new(),
        }
    }
}
