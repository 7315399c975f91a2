use pexels_gallery_core::decode_tool_output;
use pexels_gallery_core::panel::GalleryPanel;
use serde_json::{Value, json};

use crate::util::{print_error, print_json, read_input};

/// Decode a tool-output document the way the gallery widget does and print
/// the resulting state together with the panel it renders.
pub fn run(file: Option<&str>) -> i32 {
    let raw = match read_input(file) {
        Ok(raw) => raw,
        Err(message) => {
            print_error("cli_error", &message, None);
            return 1;
        }
    };
    match decode_document(&raw) {
        Ok(output) => {
            print_json(&output);
            0
        }
        Err(message) => {
            print_error(
                "invalid_json",
                &message,
                Some("Pass the tool output as a JSON document; an empty input means no output yet."),
            );
            1
        }
    }
}

/// Empty input stands for "no tool output yet".
pub fn decode_document(raw: &str) -> Result<Value, String> {
    let value = if raw.trim().is_empty() {
        None
    } else {
        Some(
            serde_json::from_str::<Value>(raw)
                .map_err(|e| format!("Failed to parse tool output: {e}"))?,
        )
    };
    let state = decode_tool_output(value.as_ref());
    let panel = GalleryPanel::for_state(&state);
    Ok(json!({
        "state": state,
        "panel": panel
    }))
}
