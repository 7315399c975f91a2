use serde_json::{Value, json};

use crate::photos::PhotoSource;

pub(crate) fn sample_source(prefix: &str) -> PhotoSource {
    PhotoSource {
        original: format!("{prefix}/original.jpg"),
        large2x: format!("{prefix}/large2x.jpg"),
        large: format!("{prefix}/large.jpg"),
        medium: format!("{prefix}/medium.jpg"),
        small: format!("{prefix}/small.jpg"),
        portrait: format!("{prefix}/portrait.jpg"),
        landscape: format!("{prefix}/landscape.jpg"),
        tiny: format!("{prefix}/tiny.jpg"),
    }
}

pub(crate) fn raw_source_json(prefix: &str) -> Value {
    json!({
        "original": format!("{prefix}/original.jpg"),
        "large2x": format!("{prefix}/large2x.jpg"),
        "large": format!("{prefix}/large.jpg"),
        "medium": format!("{prefix}/medium.jpg"),
        "small": format!("{prefix}/small.jpg"),
        "portrait": format!("{prefix}/portrait.jpg"),
        "landscape": format!("{prefix}/landscape.jpg"),
        "tiny": format!("{prefix}/tiny.jpg"),
    })
}

/// Upstream (snake_case) photo entry as the Pexels API returns it.
pub(crate) fn raw_photo_json(id: u64) -> Value {
    json!({
        "id": id,
        "width": 4000,
        "height": 6000,
        "url": format!("https://www.pexels.com/photo/{id}/"),
        "alt": "Brown cat on a windowsill",
        "avg_color": "#7E6A5B",
        "photographer": "Ana Lee",
        "photographer_url": "https://www.pexels.com/@ana",
        "src": raw_source_json(&format!("https://images.pexels.com/photos/{id}")),
    })
}
