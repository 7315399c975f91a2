use thiserror::Error;

use crate::photos::SearchResult;

/// Failures that can happen while running a photo search.
///
/// None of these cross the tool boundary as faults: the runtime converts each
/// one into the `error` variant of [`SearchResult`] via [`SearchError::into_result`].
/// The `Display` text is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No API key configured; detected before any network call
    #[error("The PEXELS_API_KEY binding is not configured on the server.")]
    Configuration,
    /// Upstream answered 401
    #[error("The Pexels API rejected the request. Double-check that the API key is valid.")]
    UpstreamAuth,
    /// Any other non-2xx answer. `detail` is the body, or the status text when the body is empty.
    #[error("Pexels API error ({status}): {detail}")]
    Upstream { status: u16, detail: String },
    /// The API could not be reached or its body could not be read
    #[error("Unable to contact Pexels: {0}")]
    Transport(String),
}

impl SearchError {
    /// Machine-readable code, used for log fields.
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::Configuration => codes::CONFIGURATION_ERROR,
            SearchError::UpstreamAuth => codes::UPSTREAM_AUTH_ERROR,
            SearchError::Upstream { .. } => codes::UPSTREAM_ERROR,
            SearchError::Transport(_) => codes::TRANSPORT_ERROR,
        }
    }

    pub fn into_result(self, query: &str) -> SearchResult {
        SearchResult::failure(self.to_string(), Some(query.to_string()))
    }
}

/// A tool input that does not satisfy the declared input schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Which input field was rejected
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Error codes used across the runtime
pub mod codes {
    pub const VALIDATION_FAILED: &str = "validation_failed";
    pub const CONFIGURATION_ERROR: &str = "configuration_error";
    pub const UPSTREAM_AUTH_ERROR: &str = "upstream_auth_error";
    pub const UPSTREAM_ERROR: &str = "upstream_error";
    pub const TRANSPORT_ERROR: &str = "transport_error";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_embeds_status_and_detail() {
        let err = SearchError::Upstream {
            status: 503,
            detail: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Pexels API error (503): Service Unavailable"
        );
        assert_eq!(err.code(), codes::UPSTREAM_ERROR);
    }

    #[test]
    fn into_result_keeps_the_original_query() {
        let result = SearchError::Configuration.into_result("mountains");
        match result {
            SearchResult::Error(failure) => {
                assert_eq!(
                    failure.message,
                    "The PEXELS_API_KEY binding is not configured on the server."
                );
                assert_eq!(failure.query.as_deref(), Some("mountains"));
            }
            SearchResult::Ok(_) => panic!("expected error variant"),
        }
    }

    #[test]
    fn transport_error_prefixes_description() {
        let err = SearchError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Unable to contact Pexels: connection refused");
    }
}
