//! Presentation-side decoding of the last tool output.
//!
//! Hosts deliver the tool result in several wrappings: the bare
//! `structuredContent`, the whole `tools/call` envelope, a `data` wrapper, or
//! text blocks carrying the result as a JSON string (sometimes encoded twice).
//! Field names may also arrive in snake_case. The decoder walks all of these
//! breadth-first and keeps the first value that reads as a [`SearchResult`].

use std::collections::VecDeque;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::photos::{Photo, PhotoSource, SearchResult, SearchSuccess};

/// Wrapper keys followed inside objects, in priority order.
const NESTED_RESULT_KEYS: [&str; 2] = ["structuredContent", "data"];

/// What the gallery should show for a given tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GalleryState {
    /// No tool output yet
    Loading,
    /// Nothing to show. `query` is set when a search ran but returned no usable photos.
    Idle {
        #[serde(skip_serializing_if = "Option::is_none")]
        query: Option<String>,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        query: Option<String>,
    },
    Results {
        data: SearchSuccess,
    },
}

impl From<SearchResult> for GalleryState {
    fn from(result: SearchResult) -> Self {
        match result {
            SearchResult::Error(failure) => GalleryState::Error {
                message: failure.message,
                query: failure.query,
            },
            // An empty page reads the same as "nothing searched yet" for that query.
            SearchResult::Ok(success) if success.photos.is_empty() => GalleryState::Idle {
                query: Some(success.query),
            },
            SearchResult::Ok(success) => GalleryState::Results { data: success },
        }
    }
}

/// Decode the host's last tool output into a gallery state.
///
/// Never fails: anything that cannot be interpreted degrades to `Idle`.
pub fn decode_tool_output(value: Option<&Value>) -> GalleryState {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return GalleryState::Loading;
    };

    collect_candidates(value)
        .iter()
        .find_map(interpret_candidate)
        .map(GalleryState::from)
        .unwrap_or(GalleryState::Idle { query: None })
}

/// Every value reachable from `root` through the known wrappings, in
/// breadth-first (dequeue) order. `root` itself is always first.
pub fn collect_candidates(root: &Value) -> Vec<Value> {
    let mut queue = VecDeque::from([root.clone()]);
    let mut candidates = Vec::new();

    while let Some(current) = queue.pop_front() {
        match &current {
            Value::String(raw) => queue.extend(parse_embedded_json(raw)),
            Value::Array(items) => queue.extend(items.iter().cloned()),
            Value::Object(map) => enqueue_nested(map, &mut queue),
            _ => {}
        }
        candidates.push(current);
    }

    candidates
}

fn enqueue_nested(map: &Map<String, Value>, queue: &mut VecDeque<Value>) {
    for key in NESTED_RESULT_KEYS {
        if let Some(nested) = map.get(key) {
            queue.push_back(nested.clone());
        }
    }

    match map.get("content") {
        Some(Value::Array(items)) => queue.extend(items.iter().cloned()),
        Some(Value::String(raw)) => queue.extend(parse_embedded_json(raw)),
        _ => {}
    }

    if let Some(Value::String(raw)) = map.get("text") {
        queue.extend(parse_embedded_json(raw));
    }
}

fn parse_embedded_json(raw: &str) -> Option<Value> {
    serde_json::from_str::<Value>(raw)
        .ok()
        .filter(|parsed| !parsed.is_null())
}

/// Read one candidate as a normalized result, or `None` if it is not one.
pub fn interpret_candidate(value: &Value) -> Option<SearchResult> {
    let map = value.as_object()?;
    match map.get("status")?.as_str()? {
        "error" => {
            let message = map.get("message")?.as_str()?;
            Some(SearchResult::failure(
                message,
                first_string(map, &["query"]).map(str::to_string),
            ))
        }
        "ok" => interpret_success(map).map(SearchResult::Ok),
        _ => None,
    }
}

fn interpret_success(map: &Map<String, Value>) -> Option<SearchSuccess> {
    let query = first_string(map, &["query", "searchTerm"]).filter(|q| !q.is_empty())?;
    let page = first_number(map, &["page", "currentPage", "current_page"])?;
    let per_page = first_number(map, &["perPage", "per_page"])?;
    let total_results = first_number(map, &["totalResults", "total_results"])?;
    let photos = map.get("photos")?.as_array()?;

    Some(SearchSuccess {
        query: query.to_string(),
        page: page.clone(),
        per_page: per_page.clone(),
        total_results: total_results.clone(),
        photos: photos.iter().filter_map(normalize_photo).collect(),
    })
}

/// Validate a single photo. Partial photos are rejected outright.
pub fn normalize_photo(value: &Value) -> Option<Photo> {
    let map = value.as_object()?;

    let id = first_number(map, &["id"])?;
    let width = first_number(map, &["width"])?;
    let height = first_number(map, &["height"])?;
    let url = map.get("url")?.as_str()?;
    let photographer = map.get("photographer")?.as_str()?;
    let src = normalize_source(map.get("src")?.as_object()?)?;

    Some(Photo {
        id: id.clone(),
        width: width.clone(),
        height: height.clone(),
        url: url.to_string(),
        alt: first_string(map, &["alt"]).map(str::to_string),
        avg_color: first_string(map, &["avgColor", "avg_color"]).map(str::to_string),
        photographer: photographer.to_string(),
        photographer_url: first_string(map, &["photographerUrl", "photographer_url"])
            .map(str::to_string),
        src,
    })
}

fn normalize_source(map: &Map<String, Value>) -> Option<PhotoSource> {
    let variant = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);
    Some(PhotoSource {
        original: variant("original")?,
        large2x: variant("large2x")?,
        large: variant("large")?,
        medium: variant("medium")?,
        small: variant("small")?,
        portrait: variant("portrait")?,
        landscape: variant("landscape")?,
        tiny: variant("tiny")?,
    })
}

/// First key (in the given order) holding a string.
fn first_string<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| map.get(*key).and_then(Value::as_str))
}

/// First key (in the given order) holding a number. Any JSON number counts:
/// negatives and fractions are carried through as they are.
fn first_number<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Number> {
    keys.iter().find_map(|key| match map.get(*key) {
        Some(Value::Number(n)) => Some(n),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{raw_photo_json, raw_source_json, sample_source};

    fn camel_photo(id: u64) -> Photo {
        Photo {
            id: id.into(),
            width: 1200.into(),
            height: 800.into(),
            url: format!("https://www.pexels.com/photo/{id}/"),
            alt: Some("Foggy forest".to_string()),
            avg_color: Some("#445544".to_string()),
            photographer: "Jon Doe".to_string(),
            photographer_url: Some("https://www.pexels.com/@jon".to_string()),
            src: sample_source(&format!("https://images.pexels.com/photos/{id}")),
        }
    }

    fn ok_result(photos: Vec<Photo>) -> SearchResult {
        SearchResult::Ok(SearchSuccess {
            query: "forest".to_string(),
            page: 1.into(),
            per_page: 12.into(),
            total_results: 321.into(),
            photos,
        })
    }

    #[test]
    fn absent_or_null_output_is_loading() {
        assert_eq!(decode_tool_output(None), GalleryState::Loading);
        assert_eq!(decode_tool_output(Some(&Value::Null)), GalleryState::Loading);
    }

    #[test]
    fn string_encoded_structured_content_round_trips() {
        let result = ok_result(vec![camel_photo(1), camel_photo(2)]);
        let encoded = serde_json::to_string(&result).unwrap();
        let output = json!({ "structuredContent": encoded });

        let SearchResult::Ok(expected) = result else {
            unreachable!()
        };
        assert_eq!(
            decode_tool_output(Some(&output)),
            GalleryState::Results { data: expected }
        );
    }

    #[test]
    fn doubly_encoded_text_block_is_decoded() {
        let result = ok_result(vec![camel_photo(3)]);
        let once = serde_json::to_string(&result).unwrap();
        let twice = serde_json::to_string(&once).unwrap();
        let output = json!({ "content": [{ "type": "text", "text": twice }] });

        assert!(matches!(
            decode_tool_output(Some(&output)),
            GalleryState::Results { ref data } if data.photos.len() == 1
        ));
    }

    #[test]
    fn empty_photo_list_in_text_block_is_idle_with_query() {
        let body = json!({
            "status": "ok",
            "query": "unicorn parking lot",
            "page": 1,
            "perPage": 12,
            "totalResults": 0,
            "photos": []
        });
        let output = json!({ "content": [{ "text": body.to_string() }] });

        assert_eq!(
            decode_tool_output(Some(&output)),
            GalleryState::Idle {
                query: Some("unicorn parking lot".to_string())
            }
        );
    }

    #[test]
    fn snake_case_fields_with_full_photo_yield_results() {
        let output = json!({
            "status": "ok",
            "query": "cats",
            "page": 1,
            "per_page": 10,
            "total_results": 0,
            "photos": [{
                "id": 1,
                "width": 10,
                "height": 10,
                "url": "u",
                "photographer": "p",
                "src": raw_source_json("s")
            }]
        });

        let GalleryState::Results { data } = decode_tool_output(Some(&output)) else {
            panic!("expected results");
        };
        assert_eq!(data.photos.len(), 1);
        assert_eq!(data.per_page.as_u64(), Some(10));
        assert_eq!(data.total_results.as_u64(), Some(0));
        assert_eq!(data.photos[0].avg_color, None);
        assert_eq!(data.photos[0].alt, None);
    }

    #[test]
    fn photo_missing_a_source_variant_is_dropped() {
        let mut broken = raw_photo_json(9);
        broken["src"].as_object_mut().unwrap().remove("tiny");
        let output = json!({
            "status": "ok",
            "query": "cats",
            "page": 1,
            "perPage": 12,
            "totalResults": 2,
            "photos": [broken.clone(), raw_photo_json(10)]
        });

        let GalleryState::Results { data } = decode_tool_output(Some(&output)) else {
            panic!("expected results");
        };
        assert_eq!(data.photos.len(), 1);
        assert_eq!(data.photos[0].id.as_u64(), Some(10));

        let only_broken = json!({
            "status": "ok",
            "query": "cats",
            "page": 1,
            "perPage": 12,
            "totalResults": 1,
            "photos": [broken]
        });
        assert_eq!(
            decode_tool_output(Some(&only_broken)),
            GalleryState::Idle {
                query: Some("cats".to_string())
            }
        );
    }

    #[test]
    fn photo_with_string_id_or_missing_photographer_is_dropped() {
        let mut string_id = raw_photo_json(1);
        string_id["id"] = json!("1");
        let mut no_photographer = raw_photo_json(2);
        no_photographer.as_object_mut().unwrap().remove("photographer");

        assert!(normalize_photo(&string_id).is_none());
        assert!(normalize_photo(&no_photographer).is_none());
        assert!(normalize_photo(&raw_photo_json(3)).is_some());
    }

    #[test]
    fn error_status_becomes_error_state() {
        let output = json!({
            "structuredContent": {
                "status": "error",
                "message": "Pexels API error (500): upstream down",
                "query": "cats"
            }
        });
        assert_eq!(
            decode_tool_output(Some(&output)),
            GalleryState::Error {
                message: "Pexels API error (500): upstream down".to_string(),
                query: Some("cats".to_string()),
            }
        );
    }

    #[test]
    fn error_without_message_is_not_a_candidate() {
        assert!(interpret_candidate(&json!({ "status": "error" })).is_none());
        assert!(interpret_candidate(&json!({ "status": "pending", "message": "x" })).is_none());
    }

    #[test]
    fn alternate_spellings_are_accepted() {
        let candidate = json!({
            "status": "ok",
            "searchTerm": "beach",
            "currentPage": 4,
            "per_page": 6,
            "total_results": 99,
            "photos": [raw_photo_json(1)]
        });
        let Some(SearchResult::Ok(success)) = interpret_candidate(&candidate) else {
            panic!("expected ok result");
        };
        assert_eq!(success.query, "beach");
        assert_eq!(success.page.as_u64(), Some(4));
        assert_eq!(success.per_page.as_u64(), Some(6));

        let snake_page = json!({
            "status": "ok",
            "query": "beach",
            "current_page": 2,
            "perPage": 6,
            "totalResults": 99,
            "photos": []
        });
        let Some(SearchResult::Ok(success)) = interpret_candidate(&snake_page) else {
            panic!("expected ok result");
        };
        assert_eq!(success.page.as_u64(), Some(2));
    }

    #[test]
    fn camel_case_photo_fields_win_over_snake_case() {
        let mut photo = raw_photo_json(1);
        photo["avgColor"] = json!("#000000");
        photo["photographerUrl"] = json!("https://camel.example");
        let normalized = normalize_photo(&photo).unwrap();
        assert_eq!(normalized.avg_color.as_deref(), Some("#000000"));
        assert_eq!(
            normalized.photographer_url.as_deref(),
            Some("https://camel.example")
        );
    }

    #[test]
    fn missing_scalar_or_non_array_photos_fails_interpretation() {
        let base = json!({
            "status": "ok",
            "query": "cats",
            "page": 1,
            "perPage": 12,
            "totalResults": 5,
            "photos": []
        });
        assert!(interpret_candidate(&base).is_some());

        for key in ["page", "perPage", "totalResults", "photos"] {
            let mut candidate = base.clone();
            candidate.as_object_mut().unwrap().remove(key);
            assert!(interpret_candidate(&candidate).is_none(), "without {key}");
        }

        let mut photos_object = base.clone();
        photos_object["photos"] = json!({ "0": raw_photo_json(1) });
        assert!(interpret_candidate(&photos_object).is_none());

        let mut empty_query = base.clone();
        empty_query["query"] = json!("");
        assert!(interpret_candidate(&empty_query).is_none());

        let mut string_page = base;
        string_page["page"] = json!("1");
        assert!(interpret_candidate(&string_page).is_none());
    }

    #[test]
    fn any_json_number_is_accepted_and_kept_verbatim() {
        let mut photo = raw_photo_json(4);
        photo["width"] = json!(1200.5);
        photo["height"] = json!(5_000_000_000_u64);
        let candidate = json!({
            "status": "ok",
            "query": "cats",
            "page": 1.5,
            "perPage": 2.0,
            "totalResults": -1,
            "photos": [photo]
        });

        let GalleryState::Results { data } = decode_tool_output(Some(&candidate)) else {
            panic!("expected results");
        };
        assert_eq!(data.page.as_f64(), Some(1.5));
        assert_eq!(data.per_page.as_f64(), Some(2.0));
        assert_eq!(data.total_results.as_i64(), Some(-1));
        assert_eq!(data.photos.len(), 1);
        assert_eq!(data.photos[0].width.as_f64(), Some(1200.5));
        assert_eq!(data.photos[0].height.as_u64(), Some(5_000_000_000));

        let wire = serde_json::to_value(&data).unwrap();
        assert_eq!(wire["totalResults"], json!(-1));
        assert_eq!(wire["page"], json!(1.5));
    }

    #[test]
    fn earlier_candidates_win_over_deeper_ones() {
        let shallow = json!({
            "status": "error",
            "message": "shallow",
        });
        let deep = ok_result(vec![camel_photo(1)]);
        let output = json!({
            "structuredContent": shallow,
            "content": [{ "type": "text", "text": serde_json::to_string(&deep).unwrap() }]
        });
        assert_eq!(
            decode_tool_output(Some(&output)),
            GalleryState::Error {
                message: "shallow".to_string(),
                query: None,
            }
        );
    }

    #[test]
    fn candidates_follow_breadth_first_order() {
        let output = json!({
            "text": "{\"level\": \"text\"}",
            "structuredContent": { "data": { "level": "deep" } },
            "data": { "level": "data" }
        });
        let levels: Vec<String> = collect_candidates(&output)
            .iter()
            .filter_map(|c| c.get("level").and_then(Value::as_str).map(str::to_string))
            .collect();
        assert_eq!(levels, ["data", "text", "deep"]);
    }

    #[test]
    fn content_string_is_parsed_and_arrays_are_walked() {
        let result = ok_result(vec![camel_photo(7)]);
        let output = json!([
            "not json at all",
            { "data": { "content": serde_json::to_string(&result).unwrap() } }
        ]);
        assert!(matches!(
            decode_tool_output(Some(&output)),
            GalleryState::Results { .. }
        ));
    }

    #[test]
    fn garbage_degrades_to_idle_without_query() {
        for output in [
            json!(42),
            json!(true),
            json!("{ broken"),
            json!([]),
            json!({ "content": 7, "text": 3, "data": null }),
            json!({ "status": "ok" }),
        ] {
            assert_eq!(
                decode_tool_output(Some(&output)),
                GalleryState::Idle { query: None },
                "input: {output}"
            );
        }
    }

    #[test]
    fn full_tools_call_envelope_is_understood() {
        let result = ok_result(vec![camel_photo(5)]);
        let envelope = crate::envelope::ToolResponse::from_result(result);
        let value = serde_json::to_value(&envelope).unwrap();
        assert!(matches!(
            decode_tool_output(Some(&value)),
            GalleryState::Results { ref data } if data.photos[0].id.as_u64() == Some(5)
        ));
    }

    #[test]
    fn gallery_state_serializes_with_kind_tag() {
        let value = serde_json::to_value(GalleryState::Idle { query: None }).unwrap();
        assert_eq!(value, json!({ "kind": "idle" }));
        let value = serde_json::to_value(GalleryState::Loading).unwrap();
        assert_eq!(value, json!({ "kind": "loading" }));
    }
}
