use std::net::SocketAddr;
use std::path::PathBuf;

use axum::middleware::from_fn;
use pexels_gallery_mcp_runtime::{McpRuntimeConfig, load_widget_html};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod middleware;
mod routes;
mod state;

#[tokio::main]
async fn main() {
    // Load .env if present (dev only)
    let _ = dotenvy::dotenv();

    // Structured JSON logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "pexels_gallery_api=debug,pexels_gallery_mcp_runtime=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let widget_path = std::env::var_os("PEXELS_WIDGET_HTML").map(PathBuf::from);
    let widget_html = match load_widget_html(widget_path.as_deref()) {
        Ok(html) => html,
        Err(err) => {
            tracing::error!(event = "widget_html_unreadable", error = %err, path = ?widget_path);
            std::process::exit(1);
        }
    };

    let api_key = std::env::var("PEXELS_API_KEY").ok();
    let base_url = std::env::var("PEXELS_API_BASE_URL").ok();
    let mcp = McpRuntimeConfig::new(api_key, base_url.as_deref(), widget_html);
    if !mcp.pexels().has_api_key() {
        tracing::warn!(
            event = "pexels_api_key_missing",
            "PEXELS_API_KEY is not set; searches will return a configuration error"
        );
    }

    let app = routes::router(state::AppState { mcp }).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::cors::build_cors_layer())
            .layer(from_fn(middleware::security_headers::apply)),
    );

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(event = "bind_failed", %addr, error = %err);
            std::process::exit(1);
        }
    };
    tracing::info!("Pexels gallery API listening on {}", addr);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(event = "server_error", error = %err);
        std::process::exit(1);
    }
}
