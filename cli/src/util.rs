use std::io::Read;

use serde_json::{Value, json};

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

pub fn print_error(code: &str, message: &str, docs_hint: Option<&str>) {
    let mut err = json!({
        "error": code,
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    eprintln!("{}", to_pretty(&err));
}

pub fn print_json(value: &Value) {
    println!("{}", to_pretty(value));
}

fn to_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// GET `{api_url}{path}` and print the JSON body.
///
/// Exit codes: 0 for 2xx, 1 for 4xx, 2 for 5xx, 3 when the API is unreachable.
pub async fn api_get(api_url: &str, path: &str) -> i32 {
    let url = match reqwest::Url::parse(&format!("{}{path}", api_url.trim_end_matches('/'))) {
        Ok(url) => url,
        Err(e) => {
            print_error(
                "cli_error",
                &format!("Invalid URL: {api_url}{path}: {e}"),
                None,
            );
            return 4;
        }
    };

    let resp = match client().get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            print_error(
                "connection_error",
                &e.to_string(),
                Some("Is the API server running? Check PEXELS_GALLERY_API_URL."),
            );
            return 3;
        }
    };

    let status = resp.status().as_u16();
    let exit_code = match status {
        200..=299 => 0,
        400..=499 => 1,
        _ => 2,
    };

    let body: Value = match resp.json().await {
        Ok(v) => v,
        Err(e) => json!({ "raw_error": format!("Failed to parse response as JSON: {e}") }),
    };

    if exit_code == 0 {
        print_json(&body);
    } else {
        eprintln!("{}", to_pretty(&body));
    }
    exit_code
}

/// Read a whole document from a file path, or stdin when the path is absent or "-".
pub fn read_input(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file '{path}': {e}")),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read stdin: {e}"))?;
            Ok(buf)
        }
    }
}
