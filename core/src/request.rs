//! Tool-call argument parsing, bounds checks and coercion into the upstream
//! search request.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

pub const DEFAULT_PER_PAGE: u32 = 12;
pub const MAX_PER_PAGE: u32 = 30;
pub const MAX_PAGE: u32 = 50;
pub const MAX_QUERY_CHARS: usize = 120;
pub const MAX_COLOR_CHARS: usize = 25;
pub const MIN_LOCALE_CHARS: usize = 2;
pub const MAX_LOCALE_CHARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    pub const ALL: [Self; 3] = [Self::Landscape, Self::Portrait, Self::Square];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSize {
    Large,
    Medium,
    Small,
}

impl PhotoSize {
    pub const ALL: [Self; 3] = [Self::Large, Self::Medium, Self::Small];
}

/// Lowercase wire name of a unit enum variant.
pub fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(name)) => name,
        _ => String::new(),
    }
}

/// Arguments of one `pexels.searchPhotos` invocation, as received.
///
/// Numeric fields stay `f64` until normalization so fractional inputs can be
/// floored the same way regardless of where they came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPhotosInput {
    pub query: String,
    pub page: Option<f64>,
    pub per_page: Option<f64>,
    pub orientation: Option<Orientation>,
    pub size: Option<PhotoSize>,
    pub color: Option<String>,
    pub locale: Option<String>,
}

impl SearchPhotosInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Read tool-call arguments, checking JSON types only.
    /// Bounds are checked separately by [`SearchPhotosInput::validate`].
    pub fn from_arguments(args: &Map<String, Value>) -> Result<Self, ValidationError> {
        let query = match args.get("query") {
            Some(Value::String(query)) => query.clone(),
            Some(_) => return Err(ValidationError::new("query", "'query' must be a string")),
            None => {
                return Err(ValidationError::new(
                    "query",
                    "Missing required field 'query'",
                ));
            }
        };

        let orientation = optional_enum(args, "orientation", &Orientation::ALL)?;
        let size = optional_enum(args, "size", &PhotoSize::ALL)?;

        Ok(Self {
            query,
            page: optional_number(args, "page")?,
            per_page: optional_number(args, "perPage")?,
            orientation,
            size,
            color: optional_string(args, "color")?,
            locale: optional_string(args, "locale")?,
        })
    }

    /// Enforce the bounds declared in the tool's input schema.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let query_len = self.query.chars().count();
        if query_len == 0 {
            return Err(ValidationError::new("query", "'query' must not be empty"));
        }
        if query_len > MAX_QUERY_CHARS {
            return Err(ValidationError::new(
                "query",
                format!("'query' must be at most {MAX_QUERY_CHARS} characters"),
            ));
        }
        check_integer_range(self.page, "page", 1, MAX_PAGE)?;
        check_integer_range(self.per_page, "perPage", 1, MAX_PER_PAGE)?;
        check_length(self.color.as_deref(), "color", 1, MAX_COLOR_CHARS)?;
        check_length(
            self.locale.as_deref(),
            "locale",
            MIN_LOCALE_CHARS,
            MAX_LOCALE_CHARS,
        )?;
        Ok(())
    }
}

fn optional_string(
    args: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<String>, ValidationError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(v)) => Ok(Some(v.clone())),
        Some(_) => Err(ValidationError::new(key, format!("'{key}' must be a string"))),
    }
}

fn optional_enum<T>(
    args: &Map<String, Value>,
    key: &'static str,
    allowed: &[T],
) -> Result<Option<T>, ValidationError>
where
    T: Serialize + DeserializeOwned,
{
    let Some(raw) = optional_string(args, key)? else {
        return Ok(None);
    };
    serde_json::from_value(Value::String(raw)).map(Some).map_err(|_| {
        let names: Vec<String> = allowed.iter().map(wire_name).collect();
        ValidationError::new(key, format!("'{key}' must be one of {}", names.join(", ")))
    })
}

fn optional_number(
    args: &Map<String, Value>,
    key: &'static str,
) -> Result<Option<f64>, ValidationError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| ValidationError::new(key, format!("'{key}' must be a number"))),
        Some(_) => Err(ValidationError::new(key, format!("'{key}' must be a number"))),
    }
}

fn check_integer_range(
    value: Option<f64>,
    field: &'static str,
    min: u32,
    max: u32,
) -> Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.fract() != 0.0 || value < f64::from(min) || value > f64::from(max) {
        return Err(ValidationError::new(
            field,
            format!("'{field}' must be an integer between {min} and {max}"),
        ));
    }
    Ok(())
}

fn check_length(
    value: Option<&str>,
    field: &'static str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::new(
            field,
            format!("'{field}' must be between {min} and {max} characters"),
        ));
    }
    Ok(())
}

/// Clamp the page size so a caller can't pull more results than the widget renders.
/// Absent, zero or NaN fall back to the default.
pub fn coerce_per_page(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v != 0.0 && !v.is_nan() => {
            v.floor().clamp(1.0, f64::from(MAX_PER_PAGE)) as u32
        }
        _ => DEFAULT_PER_PAGE,
    }
}

/// Absent or non-positive pages become 1; anything else is floored.
pub fn coerce_page(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v > 0.0 => (v.floor() as u32).max(1),
        _ => 1,
    }
}

/// Normalized outbound search. Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    page: u32,
    per_page: u32,
    orientation: Option<Orientation>,
    size: Option<PhotoSize>,
    color: Option<String>,
    locale: Option<String>,
}

impl SearchRequest {
    pub fn normalize(input: &SearchPhotosInput) -> Self {
        Self {
            query: input.query.clone(),
            page: coerce_page(input.page),
            per_page: coerce_per_page(input.per_page),
            orientation: input.orientation,
            size: input.size,
            color: non_empty(input.color.as_deref()),
            locale: non_empty(input.locale.as_deref()),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Query-string pairs for `GET {base}/search`, absent filters omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(orientation) = self.orientation {
            pairs.push(("orientation", wire_name(&orientation)));
        }
        if let Some(size) = self.size {
            pairs.push(("size", wire_name(&size)));
        }
        if let Some(color) = &self.color {
            pairs.push(("color", color.clone()));
        }
        if let Some(locale) = &self.locale {
            pairs.push(("locale", locale.clone()));
        }
        pairs
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
