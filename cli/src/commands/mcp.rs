pub use pexels_gallery_mcp_runtime::{McpCommands, run};
