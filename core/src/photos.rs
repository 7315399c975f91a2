use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

/// The eight image variants Pexels renders for every photo.
/// All of them are required; a photo missing any variant is not usable by the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PhotoSource {
    pub original: String,
    pub large2x: String,
    pub large: String,
    pub medium: String,
    pub small: String,
    pub portrait: String,
    pub landscape: String,
    pub tiny: String,
}

/// A single photo in the widget-facing (camelCase) shape.
///
/// Numeric fields hold whatever JSON number arrived, unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[schema(value_type = f64)]
    pub id: Number,
    #[schema(value_type = f64)]
    pub width: Number,
    #[schema(value_type = f64)]
    pub height: Number,
    /// Canonical photo page on pexels.com
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Average color as reported upstream; serialized as `null` when unknown
    #[serde(default)]
    pub avg_color: Option<String>,
    pub photographer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photographer_url: Option<String>,
    pub src: PhotoSource,
}

/// Successful search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchSuccess {
    pub query: String,
    #[schema(value_type = f64)]
    pub page: Number,
    #[schema(value_type = f64)]
    pub per_page: Number,
    #[schema(value_type = f64)]
    pub total_results: Number,
    pub photos: Vec<Photo>,
}

/// Failed search. `query` is echoed back when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SearchFailure {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Normalized search outcome, tagged by `status` (`ok` | `error`).
///
/// This is the `structuredContent` payload of every tool response and the
/// shape the gallery decoder reconstructs on the presentation side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SearchResult {
    Ok(SearchSuccess),
    Error(SearchFailure),
}

impl SearchResult {
    pub fn failure(message: impl Into<String>, query: Option<String>) -> Self {
        SearchResult::Error(SearchFailure {
            message: message.into(),
            query,
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SearchResult::Error(_))
    }
}
