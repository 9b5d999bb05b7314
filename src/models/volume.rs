use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One page of results from the catalog's volumes endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumesPage {
    pub total_items: u32,
    pub items: Vec<Volume>,
}

/// A single volume as returned by the catalog API. Read-only to this
/// service; `is_curated` is the one field we stamp on ourselves.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_info: Option<SearchInfo>,
    /// Set when the volume came in through a curated-list lookup.
    #[serde(default)]
    pub is_curated: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub language: Option<String>,
    pub average_rating: Option<f32>,
    pub ratings_count: Option<u32>,
    pub image_links: Option<ImageLinks>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub preview_link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub extra_large: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchInfo {
    pub text_snippet: Option<String>,
}

impl Volume {
    /// Whether the catalog gave us a usable cover image.
    pub fn has_thumbnail(&self) -> bool {
        self.volume_info
            .image_links
            .as_ref()
            .and_then(|links| links.thumbnail.as_deref())
            .is_some_and(|url| !url.is_empty())
    }

    /// Lowercased description plus search snippet, the haystack for
    /// accolade keyword checks.
    pub fn text_blob(&self) -> String {
        let description = self.volume_info.description.as_deref().unwrap_or("");
        let snippet = self
            .search_info
            .as_ref()
            .and_then(|s| s.text_snippet.as_deref())
            .unwrap_or("");
        format!("{} {}", description, snippet).to_lowercase()
    }

    pub fn ratings_count(&self) -> u32 {
        self.volume_info.ratings_count.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_catalog_shape() {
        let raw = serde_json::json!({
            "id": "abc123",
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "categories": ["Fiction"],
                "language": "en",
                "ratingsCount": 4521,
                "publishedDate": "1965-08-01",
                "imageLinks": { "thumbnail": "http://example.test/dune.jpg" }
            },
            "searchInfo": { "textSnippet": "A stunning blend of adventure..." }
        });

        let volume: Volume = serde_json::from_value(raw).expect("volume shape");
        assert_eq!(volume.id, "abc123");
        assert_eq!(volume.volume_info.title.as_deref(), Some("Dune"));
        assert_eq!(volume.ratings_count(), 4521);
        assert!(volume.has_thumbnail());
        assert!(!volume.is_curated);
        assert!(volume.text_blob().contains("stunning blend"));
    }

    #[test]
    fn tolerates_sparse_volumes() {
        let volume: Volume = serde_json::from_value(serde_json::json!({ "id": "x" }))
            .expect("minimal volume");
        assert!(!volume.has_thumbnail());
        assert_eq!(volume.ratings_count(), 0);
        assert_eq!(volume.text_blob().trim(), "");
    }
}
