//! Book catalog client
//!
//! Talks to the Google Books `volumes` endpoint. The rest of the crate only
//! sees the [`BookCatalog`] trait, so views and tests never need a network.

use crate::error::SearchError;
use crate::search::ResultItem;
use crate::AppConfig;
use serde::Deserialize;

/// Public Google Books search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/books/v1/volumes";

/// Anything that can answer a free-text book query with the first page of hits.
pub trait BookCatalog: Send + Sync {
    fn search(&self, query: &str) -> Result<Vec<ResultItem>, SearchError>;
}

impl<C: BookCatalog + ?Sized> BookCatalog for std::sync::Arc<C> {
    fn search(&self, query: &str) -> Result<Vec<ResultItem>, SearchError> {
        (**self).search(query)
    }
}

// Wire format. Every nested field may be absent.

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Option<Vec<VolumeRecord>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeRecord {
    id: Option<String>,
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    image_links: Option<ImageLinks>,
    preview_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl VolumeRecord {
    fn into_item(self, position: usize) -> ResultItem {
        let info = self.volume_info.unwrap_or_default();
        ResultItem {
            id: self.id.unwrap_or_else(|| format!("item-{}", position)),
            title: info.title,
            authors: info.authors,
            thumbnail_url: info.image_links.and_then(|links| links.thumbnail),
            preview_link: info.preview_link,
        }
    }
}

/// Parse a `volumes` response body. A body without `items` is zero results.
pub fn parse_volumes(body: &str) -> Result<Vec<ResultItem>, SearchError> {
    let response: VolumesResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::request_failed(format!("invalid JSON response: {}", e)))?;

    Ok(response
        .items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(position, record)| record.into_item(position))
        .collect())
}

/// Blocking client for the Google Books API
pub struct GoogleBooksClient {
    agent: ureq::Agent,
    endpoint: String,
    language: String,
    max_results: usize,
    user_agent: String,
}

impl GoogleBooksClient {
    pub fn new(config: &AppConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            agent: builder.build(),
            endpoint: config.endpoint.trim_end_matches('?').to_string(),
            language: config.language.clone(),
            max_results: config.max_results,
            user_agent: config.user_agent.clone(),
        }
    }

    /// Full request URL for one query
    pub fn volumes_url(&self, query: &str) -> String {
        format!(
            "{}?langRestrict={}&maxResults={}&q={}",
            self.endpoint,
            urlencoding::encode(&self.language),
            self.max_results,
            urlencoding::encode(query)
        )
    }
}

impl BookCatalog for GoogleBooksClient {
    fn search(&self, query: &str) -> Result<Vec<ResultItem>, SearchError> {
        let url = self.volumes_url(query);
        tracing::debug!(%url, "requesting volumes");

        let resp = self
            .agent
            .get(&url)
            .set("User-Agent", &self.user_agent)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => {
                    SearchError::request_failed(format!("HTTP status {}", code))
                }
                other => SearchError::request_failed(other),
            })?;

        let body = resp
            .into_string()
            .map_err(|e| SearchError::request_failed(format!("failed to read response: {}", e)))?;

        parse_volumes(&body)
    }
}
