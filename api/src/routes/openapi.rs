use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use super::ApiDoc;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api-doc/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
