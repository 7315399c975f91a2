use clap::Args;
use pexels_gallery_core::envelope::ToolResponse;
use pexels_gallery_core::error::codes;
use pexels_gallery_core::{SearchPhotosInput, ValidationError};
use pexels_gallery_mcp_runtime::PexelsClient;
use serde_json::{Map, Value, json};

use crate::util::{print_error, print_json};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Keywords to search for, e.g. "golden hour mountains"
    pub query: String,
    /// Page number to fetch (1-50)
    #[arg(long)]
    pub page: Option<u32>,
    /// How many photos to return (1-30)
    #[arg(long)]
    pub per_page: Option<u32>,
    /// landscape, portrait or square
    #[arg(long)]
    pub orientation: Option<String>,
    /// large, medium or small
    #[arg(long)]
    pub size: Option<String>,
    /// Hex color (00b7ff) or keyword (teal)
    #[arg(long)]
    pub color: Option<String>,
    /// ISO locale, e.g. en-US
    #[arg(long)]
    pub locale: Option<String>,
    /// Pexels API key
    #[arg(long, env = "PEXELS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Run one search and print the tool envelope the MCP server would return.
///
/// Exit codes: 0 ok, 1 invalid arguments, 2 the search produced an error result.
pub async fn run(base_url: Option<&str>, args: SearchArgs) -> i32 {
    let input = match input_from_args(&args) {
        Ok(input) => input,
        Err(err) => {
            print_error(
                codes::VALIDATION_FAILED,
                &err.message,
                Some(&format!("Check --{}.", flag_name(err.field))),
            );
            return 1;
        }
    };

    let client = PexelsClient::new(args.api_key, base_url);
    let response = ToolResponse::from_result(client.search_photos(&input).await);
    let exit_code = if response.is_error { 2 } else { 0 };
    match serde_json::to_value(&response) {
        Ok(value) => print_json(&value),
        Err(e) => {
            print_error("cli_error", &format!("Failed to encode result: {e}"), None);
            return 2;
        }
    }
    exit_code
}

/// Route flags through the same argument parsing and bounds checks as a tool call.
fn input_from_args(args: &SearchArgs) -> Result<SearchPhotosInput, ValidationError> {
    let mut map = Map::new();
    map.insert("query".to_string(), json!(args.query));
    let optional = [
        ("page", args.page.map(Value::from)),
        ("perPage", args.per_page.map(Value::from)),
        ("orientation", args.orientation.clone().map(Value::from)),
        ("size", args.size.clone().map(Value::from)),
        ("color", args.color.clone().map(Value::from)),
        ("locale", args.locale.clone().map(Value::from)),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            map.insert(key.to_string(), value);
        }
    }

    let input = SearchPhotosInput::from_arguments(&map)?;
    input.validate()?;
    Ok(input)
}

fn flag_name(field: &str) -> &str {
    match field {
        "perPage" => "per-page",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use pexels_gallery_core::request::PhotoSize;

    use super::*;

    fn args(query: &str) -> SearchArgs {
        SearchArgs {
            query: query.to_string(),
            page: None,
            per_page: None,
            orientation: None,
            size: None,
            color: None,
            locale: None,
            api_key: None,
        }
    }

    #[test]
    fn flags_become_tool_arguments() {
        let mut search = args("ocean");
        search.per_page = Some(20);
        search.size = Some("small".to_string());
        let input = input_from_args(&search).unwrap();
        assert_eq!(input.query, "ocean");
        assert_eq!(input.per_page, Some(20.0));
        assert_eq!(input.size, Some(PhotoSize::Small));
        assert_eq!(input.page, None);
    }

    #[test]
    fn out_of_range_flags_are_rejected_with_field() {
        let mut search = args("ocean");
        search.per_page = Some(31);
        let err = input_from_args(&search).unwrap_err();
        assert_eq!(err.field, "perPage");
        assert_eq!(flag_name(err.field), "per-page");
    }

    #[test]
    fn unknown_orientation_is_rejected() {
        let mut search = args("ocean");
        search.orientation = Some("diagonal".to_string());
        assert_eq!(input_from_args(&search).unwrap_err().field, "orientation");
    }

    #[tokio::test]
    async fn missing_key_prints_error_envelope_and_exits_2() {
        let code = run(Some("http://127.0.0.1:9"), args("ocean")).await;
        assert_eq!(code, 2);
    }
}
