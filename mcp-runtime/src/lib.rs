use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Subcommand};
use pexels_gallery_core::envelope::ToolResponse;
use pexels_gallery_core::error::codes;
use pexels_gallery_core::{SearchPhotosInput, ValidationError};
use serde_json::{Map, Value, json};
use tokio::io::{self, BufReader};
use uuid::Uuid;

pub mod catalog;
pub mod pexels;
mod rpc;
mod util;

use catalog::{SEARCH_TOOL_NAME, resource_definitions, tool_definitions};
pub use pexels::PexelsClient;
use rpc::{
    RpcError, ToolError, error_response, read_framed_body, success_response, to_pretty_json,
    write_framed_json,
};
pub use util::load_widget_html;

const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
const MCP_SERVER_NAME: &str = "pexels-gallery";

#[derive(Subcommand)]
pub enum McpCommands {
    /// Run the Pexels gallery MCP server over stdio
    Serve(McpServeArgs),
}

#[derive(Args, Clone, Debug)]
pub struct McpServeArgs {
    /// Pexels API key sent as the Authorization header
    #[arg(long, env = "PEXELS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Serve this HTML file as the gallery widget instead of the built-in shell
    #[arg(long, env = "PEXELS_WIDGET_HTML")]
    pub widget_html: Option<PathBuf>,
}

pub async fn run(base_url: Option<&str>, command: McpCommands) -> i32 {
    match command {
        McpCommands::Serve(args) => {
            let widget_html = match load_widget_html(args.widget_html.as_deref()) {
                Ok(html) => html,
                Err(err) => {
                    let payload = json!({
                        "error": "widget_html_unreadable",
                        "message": format!("Failed to read widget HTML: {err}"),
                    });
                    eprintln!("{}", to_pretty_json(&payload));
                    return 1;
                }
            };
            let server = McpServer::new(McpRuntimeConfig::new(
                args.api_key,
                base_url,
                widget_html,
            ));
            match server.serve_stdio().await {
                Ok(()) => 0,
                Err(err) => {
                    let payload = json!({
                        "error": "mcp_server_error",
                        "message": err,
                    });
                    eprintln!("{}", to_pretty_json(&payload));
                    1
                }
            }
        }
    }
}

/// Handle one HTTP-delivered JSON-RPC payload (single or batch) statelessly.
pub async fn handle_http_jsonrpc(config: &McpRuntimeConfig, incoming: Value) -> Vec<Value> {
    let server = McpServer::new(config.clone());
    server.handle_incoming_message(incoming).await
}

/// Everything a server instance needs; cheap to clone.
#[derive(Clone)]
pub struct McpRuntimeConfig {
    pexels: PexelsClient,
    widget_html: Arc<str>,
}

impl McpRuntimeConfig {
    pub fn new(
        api_key: Option<String>,
        base_url: Option<&str>,
        widget_html: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            pexels: PexelsClient::new(api_key, base_url),
            widget_html: widget_html.into(),
        }
    }

    pub fn pexels(&self) -> &PexelsClient {
        &self.pexels
    }
}

struct McpServer {
    config: McpRuntimeConfig,
    session_id: String,
}

impl McpServer {
    fn new(config: McpRuntimeConfig) -> Self {
        Self {
            config,
            session_id: format!("session-{}", Uuid::now_v7()),
        }
    }

    async fn serve_stdio(&self) -> Result<(), String> {
        tracing::info!(
            event = "mcp_server_started",
            server = MCP_SERVER_NAME,
            version = env!("CARGO_PKG_VERSION"),
            session_id = %self.session_id,
            base_url = %self.config.pexels.base_url(),
            api_key_configured = self.config.pexels.has_api_key(),
        );

        let stdin = io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = io::stdout();

        loop {
            let body = read_framed_body(&mut reader)
                .await
                .map_err(|e| format!("Failed to read MCP message: {e}"))?;
            let Some(body) = body else {
                break;
            };

            let responses = match serde_json::from_slice::<Value>(&body) {
                Ok(incoming) => self.handle_incoming_message(incoming).await,
                Err(err) => {
                    tracing::warn!(event = "mcp_parse_error", error = %err);
                    vec![error_response(Value::Null, RpcError::parse_error())]
                }
            };
            for response in responses {
                write_framed_json(&mut stdout, &response)
                    .await
                    .map_err(|e| format!("Failed to write MCP response: {e}"))?;
            }
        }

        tracing::info!(event = "mcp_server_stopped", session_id = %self.session_id);
        Ok(())
    }

    async fn handle_incoming_message(&self, incoming: Value) -> Vec<Value> {
        let mut responses = Vec::new();

        if let Some(batch) = incoming.as_array() {
            if batch.is_empty() {
                responses.push(error_response(
                    Value::Null,
                    RpcError::invalid_request("Batch request must not be empty"),
                ));
                return responses;
            }
            for item in batch {
                if let Some(response) = self.handle_single_message(item.clone()).await {
                    responses.push(response);
                }
            }
            return responses;
        }

        if let Some(response) = self.handle_single_message(incoming).await {
            responses.push(response);
        }
        responses
    }

    async fn handle_single_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            let id = obj.get("id").cloned().unwrap_or(Value::Null);
            return Some(error_response(
                id,
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            // A client response; this server never issues requests of its own.
            return None;
        };

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        if let Some(id) = obj.get("id").cloned() {
            tracing::debug!(event = "mcp_request", session_id = %self.session_id, method);
            let result = self.handle_request(method, params).await;
            Some(match result {
                Ok(payload) => success_response(id, payload),
                Err(err) => error_response(id, err),
            })
        } else {
            tracing::debug!(event = "mcp_notification", session_id = %self.session_id, method);
            None
        }
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize_payload()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list_payload()),
            "tools/call" => self.handle_tools_call(params).await,
            "resources/list" => Ok(self.resources_list_payload()),
            "resources/read" => self.handle_resources_read(params),
            "prompts/list" => Ok(json!({ "prompts": [] })),
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    fn initialize_payload(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                },
                "resources": {
                    "listChanged": false
                },
                "prompts": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": MCP_SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": format!(
                "Call {SEARCH_TOOL_NAME} to find photos. The gallery widget renders the results, so reply with a short summary instead of listing image URLs."
            )
        })
    }

    fn tools_list_payload(&self) -> Value {
        let tools: Vec<Value> = tool_definitions()
            .iter()
            .map(|tool| tool.to_value())
            .collect();
        json!({ "tools": tools })
    }

    fn resources_list_payload(&self) -> Value {
        let resources: Vec<Value> = resource_definitions()
            .iter()
            .map(|res| res.to_value())
            .collect();
        json!({ "resources": resources })
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("tools/call params must be an object"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;

        let args = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(RpcError::invalid_params(
                    "tools/call 'arguments' must be an object",
                ));
            }
        };

        if name != SEARCH_TOOL_NAME {
            let err = ToolError::new("unknown_tool", format!("Unknown tool '{name}'"))
                .with_field("name")
                .with_docs_hint("Call tools/list for the available tools.");
            return Err(RpcError::invalid_params(err.message()).with_data(err.to_value()));
        }

        tracing::info!(event = "mcp_tool_call", session_id = %self.session_id, tool = name);
        let input = parse_search_input(&args).map_err(|err| {
            let err = ToolError::new(codes::VALIDATION_FAILED, err.message)
                .with_field(err.field)
                .with_docs_hint(format!(
                    "See the inputSchema of {SEARCH_TOOL_NAME} in tools/list."
                ));
            tracing::warn!(
                event = "mcp_tool_call_rejected",
                session_id = %self.session_id,
                error = err.message(),
            );
            RpcError::invalid_params(err.message()).with_data(err.to_value())
        })?;

        let result = self.config.pexels.search_photos(&input).await;
        serde_json::to_value(ToolResponse::from_result(result))
            .map_err(|e| RpcError::internal(format!("Failed to encode tool result: {e}")))
    }

    fn handle_resources_read(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("resources/read params must be an object"))?;
        let uri = params.get("uri").and_then(Value::as_str).ok_or_else(|| {
            RpcError::invalid_params("resources/read requires string field 'uri'")
        })?;

        let Some(resource) = resource_definitions().into_iter().find(|res| res.uri == uri) else {
            let err = ToolError::new("unknown_resource", format!("Unknown resource '{uri}'"))
                .with_field("uri")
                .with_docs_hint("Call resources/list for the available resources.");
            return Err(RpcError::invalid_params(err.message()).with_data(err.to_value()));
        };

        Ok(json!({
            "contents": [{
                "uri": resource.uri,
                "mimeType": resource.mime_type,
                "text": &*self.config.widget_html,
                "_meta": resource.meta
            }]
        }))
    }
}

fn parse_search_input(args: &Map<String, Value>) -> Result<SearchPhotosInput, ValidationError> {
    let input = SearchPhotosInput::from_arguments(args)?;
    input.validate()?;
    Ok(input)
}
