use pexels_gallery_core::{
    SearchError, SearchPhotosInput, SearchRequest, SearchResult, normalize_response,
};
use serde_json::Value;

use crate::util::{client, normalize_api_key, normalize_base_url};

/// Thin client over `GET {base}/search`.
///
/// Every outcome comes back as a [`SearchResult`]; failures never escape as
/// errors past [`PexelsClient::search_photos`].
#[derive(Clone)]
pub struct PexelsClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl PexelsClient {
    pub fn new(api_key: Option<String>, base_url: Option<&str>) -> Self {
        Self {
            http: client(),
            api_key: normalize_api_key(api_key),
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn search_photos(&self, input: &SearchPhotosInput) -> SearchResult {
        let request = SearchRequest::normalize(input);
        match self.try_search(&request).await {
            Ok(result) => {
                let status = if result.is_error() { "error" } else { "ok" };
                tracing::info!(
                    event = "pexels_search_completed",
                    query = %request.query(),
                    page = request.page(),
                    per_page = request.per_page(),
                    status,
                );
                result
            }
            Err(err) => {
                tracing::warn!(
                    event = "pexels_search_failed",
                    code = err.code(),
                    query = %request.query(),
                    error = %err,
                );
                err.into_result(request.query())
            }
        }
    }

    async fn try_search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::Configuration)?;
        let url = self.search_url(request)?;

        let response = self
            .http
            .get(url)
            .header("Authorization", api_key)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(SearchError::UpstreamAuth);
        }
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).to_string();
            let detail = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                detail,
            });
        }

        let body: Value = serde_json::from_slice(&bytes)
            .map_err(|e| SearchError::Transport(format!("invalid response body: {e}")))?;
        normalize_response(&body, request.query())
            .map_err(|e| SearchError::Transport(format!("invalid response body: {e}")))
    }

    fn search_url(&self, request: &SearchRequest) -> Result<reqwest::Url, SearchError> {
        let mut url = reqwest::Url::parse(&format!("{}/search", self.base_url))
            .map_err(|e| SearchError::Transport(format!("invalid base URL: {e}")))?;
        {
            let mut qp = url.query_pairs_mut();
            for (key, value) in request.query_pairs() {
                qp.append_pair(key, &value);
            }
        }
        Ok(url)
    }
}
