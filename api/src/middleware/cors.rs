use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

const CORS_ORIGINS_ENV: &str = "PEXELS_GALLERY_CORS_ORIGINS";

/// Chat hosts that embed the gallery widget and call `/mcp` directly.
const CONNECTOR_ORIGINS: &[&str] = &[
    "https://chatgpt.com",
    "https://chat.openai.com",
    "https://claude.ai",
];

/// Build a CORS layer from `PEXELS_GALLERY_CORS_ORIGINS` (comma-separated,
/// default `http://localhost:3000`) plus the connector origins.
pub fn build_cors_layer() -> CorsLayer {
    let configured =
        std::env::var(CORS_ORIGINS_ENV).unwrap_or_else(|_| "http://localhost:3000".to_string());

    CorsLayer::new()
        .allow_origin(allowed_origins(&configured))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("mcp-protocol-version"),
        ])
        .max_age(std::time::Duration::from_secs(3600))
}

fn allowed_origins(configured: &str) -> Vec<HeaderValue> {
    let mut origin_values: Vec<String> = configured
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    for connector_origin in CONNECTOR_ORIGINS {
        if !origin_values
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(connector_origin))
        {
            origin_values.push((*connector_origin).to_string());
        }
    }

    origin_values
        .into_iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect()
}
