use serde::Serialize;

use crate::photos::SearchResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: text.into(),
        }
    }
}

/// `tools/call` result: a short text summary for the model plus the
/// normalized result for the widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<TextContent>,
    pub structured_content: SearchResult,
    pub is_error: bool,
}

impl ToolResponse {
    pub fn from_result(result: SearchResult) -> Self {
        let summary = summarize(&result);
        Self {
            content: vec![TextContent::new(summary)],
            is_error: result.is_error(),
            structured_content: result,
        }
    }
}

/// Text block that accompanies a result. The cards render the photos, so the
/// summary never lists URLs.
pub fn summarize(result: &SearchResult) -> String {
    match result {
        SearchResult::Ok(success) => format!(
            "Found {} Pexels photos for “{}”.",
            success.photos.len(),
            success.query
        ),
        SearchResult::Error(failure) => failure.message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::photos::SearchSuccess;

    #[test]
    fn ok_envelope_is_not_an_error_and_counts_photos() {
        let envelope = ToolResponse::from_result(SearchResult::Ok(SearchSuccess {
            query: "lakes".to_string(),
            page: 1.into(),
            per_page: 12.into(),
            total_results: 0.into(),
            photos: Vec::new(),
        }));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["isError"], false);
        assert_eq!(
            value["content"],
            json!([{ "type": "text", "text": "Found 0 Pexels photos for “lakes”." }])
        );
        assert_eq!(value["structuredContent"]["status"], "ok");
    }

    #[test]
    fn error_envelope_repeats_message_as_text() {
        let envelope = ToolResponse::from_result(SearchResult::failure(
            "Pexels API error (500): oops",
            Some("lakes".to_string()),
        ));
        assert!(envelope.is_error);
        assert_eq!(envelope.content[0].text, "Pexels API error (500): oops");
    }
}
