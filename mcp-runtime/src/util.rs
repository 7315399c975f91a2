use std::path::Path;

pub const DEFAULT_PEXELS_BASE_URL: &str = "https://api.pexels.com/v1";

const DEFAULT_WIDGET_HTML: &str = include_str!("../assets/pexels-gallery.html");

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Resolve the API base URL: configured value or the public endpoint, without
/// trailing slashes so `/search` can be appended directly.
pub fn normalize_base_url(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_PEXELS_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Blank keys count as missing; they could never authenticate.
pub fn normalize_api_key(raw: Option<String>) -> Option<String> {
    raw.filter(|key| !key.trim().is_empty())
}

/// Built-in widget markup, or the contents of `path` when a bundled build is supplied.
pub fn load_widget_html(path: Option<&Path>) -> Result<String, std::io::Error> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => Ok(DEFAULT_WIDGET_HTML.to_string()),
    }
}
