use reqwest::Client;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::models::{Volume, VolumesPage};

pub const DEFAULT_BOOKS_API_URL: &str = "https://www.googleapis.com/books/v1/volumes";

/// Parameters for one volumes query. Field names mirror the catalog's own
/// query-string grammar (`maxResults`, `printType`, `langRestrict`,
/// `startIndex`); the `q` value carries any `subject:` / `inauthor:` /
/// `intitle:` / `isbn:` field prefixes verbatim.
#[derive(Debug, Clone, Default)]
pub struct VolumeQuery {
    pub q: String,
    pub max_results: u32,
    pub print_type: Option<&'static str>,
    pub lang_restrict: Option<&'static str>,
    pub start_index: Option<u32>,
}

impl VolumeQuery {
    pub fn new(q: impl Into<String>, max_results: u32) -> Self {
        Self {
            q: q.into(),
            max_results,
            ..Default::default()
        }
    }

    pub fn books(mut self) -> Self {
        self.print_type = Some("books");
        self
    }

    pub fn english(mut self) -> Self {
        self.lang_restrict = Some("en");
        self
    }

    pub fn starting_at(mut self, index: u32) -> Self {
        self.start_index = Some(index);
        self
    }
}

/// Thin client over the third-party volumes API. The one external
/// collaborator of this service; no retries, no caching.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run a volumes search. Non-2xx responses and body parse failures both
    /// surface as errors; callers decide whether to degrade.
    pub async fn search(&self, query: &VolumeQuery) -> Result<Vec<Volume>> {
        let mut params: Vec<(&str, String)> = vec![
            ("q", query.q.clone()),
            ("maxResults", query.max_results.to_string()),
        ];
        if let Some(print_type) = query.print_type {
            params.push(("printType", print_type.to_string()));
        }
        if let Some(lang) = query.lang_restrict {
            params.push(("langRestrict", lang.to_string()));
        }
        if let Some(start) = query.start_index {
            params.push(("startIndex", start.to_string()));
        }

        debug!("catalog search: q='{}'", query.q);

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        let page: VolumesPage = response
            .json()
            .await
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;

        Ok(page.items)
    }

    /// Fetch a single volume by identifier.
    pub async fn volume(&self, id: &str) -> Result<Volume> {
        let url = format!("{}/{}", self.base_url, id);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("Volume {} not found", id)));
        }
        let response = response.error_for_status()?;

        response
            .json()
            .await
            .map_err(|e| ApiError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builder_sets_catalog_grammar_fields() {
        let query = VolumeQuery::new("subject:history", 40)
            .books()
            .english()
            .starting_at(12);

        assert_eq!(query.q, "subject:history");
        assert_eq!(query.max_results, 40);
        assert_eq!(query.print_type, Some("books"));
        assert_eq!(query.lang_restrict, Some("en"));
        assert_eq!(query.start_index, Some(12));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = CatalogClient::new("https://example.test/books/v1/volumes/");
        assert_eq!(client.base_url, "https://example.test/books/v1/volumes");
    }
}
