use pexels_gallery_mcp_runtime::McpRuntimeConfig;

#[derive(Clone)]
pub struct AppState {
    pub mcp: McpRuntimeConfig,
}
