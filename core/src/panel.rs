use serde::Serialize;
use serde_json::Number;

use crate::gallery::GalleryState;
use crate::photos::Photo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelRole {
    Status,
    Alert,
}

/// Card shown for one photo in the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCard {
    pub id: Number,
    pub title: String,
    pub byline: String,
    pub image_url: String,
    pub image_alt: String,
    pub link_url: String,
}

impl From<&Photo> for PhotoCard {
    fn from(photo: &Photo) -> Self {
        let title = photo
            .alt
            .as_deref()
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .unwrap_or("Untitled photo")
            .to_string();
        let image_alt = photo
            .alt
            .clone()
            .filter(|alt| !alt.is_empty())
            .unwrap_or_else(|| format!("Photo by {}", photo.photographer));
        Self {
            id: photo.id.clone(),
            title,
            byline: format!("by {}", photo.photographer),
            image_url: photo.src.large.clone(),
            image_alt,
            link_url: photo.url.clone(),
        }
    }
}

/// Rendered view of a [`GalleryState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "panel", rename_all = "snake_case")]
pub enum GalleryPanel {
    Loading {
        message: String,
    },
    EmptyState {
        title: String,
        message: String,
        role: PanelRole,
    },
    Carousel {
        cards: Vec<PhotoCard>,
    },
}

impl GalleryPanel {
    pub fn for_state(state: &GalleryState) -> Self {
        match state {
            GalleryState::Loading => GalleryPanel::Loading {
                message: "Preparing your Pexels gallery…".to_string(),
            },
            GalleryState::Error { message, .. } => GalleryPanel::EmptyState {
                title: "We couldn’t load Pexels".to_string(),
                message: if message.is_empty() {
                    "Please try your search again.".to_string()
                } else {
                    message.clone()
                },
                role: PanelRole::Alert,
            },
            GalleryState::Idle {
                query: Some(query),
            } if !query.is_empty() => GalleryPanel::EmptyState {
                title: format!("No results for “{query}”"),
                message: "Try a different keyword, adjust orientation filters, or broaden your search terms.".to_string(),
                role: PanelRole::Status,
            },
            GalleryState::Idle { .. } => GalleryPanel::EmptyState {
                title: "Ready for Pexels results".to_string(),
                message: "Invoke the Pexels search tool from the assistant or wire up a callTool handler to fetch photos.".to_string(),
                role: PanelRole::Status,
            },
            GalleryState::Results { data } => GalleryPanel::Carousel {
                cards: data.photos.iter().map(PhotoCard::from).collect(),
            },
        }
    }
}
