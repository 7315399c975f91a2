use pexels_gallery_core::request::{
    MAX_COLOR_CHARS, MAX_LOCALE_CHARS, MAX_PAGE, MAX_PER_PAGE, MAX_QUERY_CHARS, MIN_LOCALE_CHARS,
    Orientation, PhotoSize,
};
use serde_json::{Value, json};

pub const SEARCH_TOOL_NAME: &str = "pexels.searchPhotos";
pub const WIDGET_NAME: &str = "pexels-gallery";
pub const WIDGET_URI: &str = "ui://widget/pexels-gallery.html";
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
pub const WIDGET_CSP: &str = "default-src 'none'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; img-src 'self' data: https://images.pexels.com; frame-ancestors 'none';";

#[derive(Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub meta: Value,
}

impl ToolDefinition {
    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "inputSchema": self.input_schema,
            "_meta": self.meta
        })
    }
}

#[derive(Clone)]
pub struct ResourceDefinition {
    pub uri: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
    pub meta: Value,
}

impl ResourceDefinition {
    pub fn to_value(&self) -> Value {
        json!({
            "uri": self.uri,
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "mimeType": self.mime_type,
            "_meta": self.meta
        })
    }
}

pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: SEARCH_TOOL_NAME,
        title: "Search the Pexels photo library",
        description: "Look up high-quality, free-to-use photography from the Pexels catalog. The UI cards show the photos, so the response does not need to list URLs.",
        input_schema: search_input_schema(),
        meta: json!({
            "openai/outputTemplate": WIDGET_URI,
            "openai/widgetAccessible": true,
            "openai/toolInvocation/invoking": "Searching the Pexels library…",
            "openai/toolInvocation/invoked": "Pexels search complete.",
            "openai/readOnlyHint": true
        }),
    }]
}

pub fn resource_definitions() -> Vec<ResourceDefinition> {
    vec![ResourceDefinition {
        uri: WIDGET_URI,
        name: WIDGET_NAME,
        title: "Pexels Gallery Widget",
        description: "Interactive gallery for browsing Pexels photo search results.",
        mime_type: WIDGET_MIME_TYPE,
        meta: json!({ "openai/widgetCSP": WIDGET_CSP }),
    }]
}

fn search_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_QUERY_CHARS,
                "description": "Keywords to search for, e.g. “golden hour mountains”."
            },
            "page": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_PAGE,
                "description": "Page number to fetch."
            },
            "perPage": {
                "type": "integer",
                "minimum": 1,
                "maximum": MAX_PER_PAGE,
                "description": format!("How many photos to return (max {MAX_PER_PAGE}).")
            },
            "orientation": {
                "type": "string",
                "enum": Orientation::ALL,
                "description": "Limit results to a specific aspect ratio."
            },
            "size": {
                "type": "string",
                "enum": PhotoSize::ALL,
                "description": "Prefer a particular asset size."
            },
            "color": {
                "type": "string",
                "minLength": 1,
                "maxLength": MAX_COLOR_CHARS,
                "description": "Hex color (e.g. 00b7ff) or keyword (e.g. teal) to bias the palette."
            },
            "locale": {
                "type": "string",
                "minLength": MIN_LOCALE_CHARS,
                "maxLength": MAX_LOCALE_CHARS,
                "description": "ISO locale code to localize the search, e.g. en-US."
            }
        },
        "required": ["query"]
    })
}
