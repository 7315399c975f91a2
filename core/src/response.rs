use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::gallery::normalize_photo;
use crate::photos::{SearchResult, SearchSuccess};

const UPSTREAM_ERROR_FALLBACK: &str = "The Pexels API returned an error.";

/// The body was neither an `{error}` object nor a result page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected `{missing}` in the search response")]
pub struct MalformedPage {
    pub missing: &'static str,
}

/// Map an upstream `GET /search` body into the normalized result.
///
/// Any body carrying an `error` key is an error, whatever else it holds.
/// Paging numbers are copied verbatim and nothing is clamped. Photo entries
/// are renamed to camelCase; an entry that cannot form a [`Photo`] is skipped
/// on its own without failing the page.
///
/// [`Photo`]: crate::photos::Photo
pub fn normalize_response(
    body: &Value,
    original_query: &str,
) -> Result<SearchResult, MalformedPage> {
    let map = body.as_object().ok_or(MalformedPage { missing: "object" })?;

    if let Some(error) = map.get("error") {
        let message = error
            .as_str()
            .filter(|text| !text.is_empty())
            .unwrap_or(UPSTREAM_ERROR_FALLBACK);
        return Ok(SearchResult::failure(
            message,
            Some(original_query.to_string()),
        ));
    }

    let photos = map
        .get("photos")
        .and_then(Value::as_array)
        .ok_or(MalformedPage { missing: "photos" })?;

    Ok(SearchResult::Ok(SearchSuccess {
        query: original_query.to_string(),
        page: number(map, "page")?,
        per_page: number(map, "per_page")?,
        total_results: number(map, "total_results")?,
        photos: photos.iter().filter_map(normalize_photo).collect(),
    }))
}

fn number(map: &Map<String, Value>, key: &'static str) -> Result<Number, MalformedPage> {
    match map.get(key) {
        Some(Value::Number(n)) => Ok(n.clone()),
        _ => Err(MalformedPage { missing: key }),
    }
}
