use axum::Router;
use utoipa::OpenApi;

use crate::state::AppState;

pub mod health;
pub mod mcp_http;
pub mod openapi;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(openapi::router())
        .merge(health::router())
        .merge(mcp_http::router())
        .with_state(state)
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pexels Gallery API",
        version = "0.1.0",
        description = "MCP endpoint exposing Pexels photo search to chat hosts, plus the result shape the gallery widget renders."
    ),
    paths(health::health_check, mcp_http::mcp_post),
    components(schemas(
        health::HealthResponse,
        pexels_gallery_core::SearchResult,
        pexels_gallery_core::SearchSuccess,
        pexels_gallery_core::SearchFailure,
        pexels_gallery_core::Photo,
        pexels_gallery_core::PhotoSource,
    ))
)]
pub struct ApiDoc;
