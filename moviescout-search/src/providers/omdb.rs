//! OMDb HTTP provider.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::MovieSearchProvider;
use crate::config::SearchConfig;
use crate::errors::MovieSearchError;
use crate::types::{MovieDetail, MovieSummary, Page, SearchQuery};

/// Provider backed by the OMDb REST API.
///
/// Any body carrying an `Error` field is reported as
/// [`MovieSearchError::Application`] with the backend text, whatever the HTTP
/// status. No retries are attempted.
#[derive(Debug, Clone)]
pub struct OmdbProvider {
    client: reqwest::Client,
    endpoint: Url,
    api_key: Option<String>,
}

/// Response from the OMDb list search endpoint.
#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Option<Vec<MovieSummary>>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

impl OmdbProvider {
    /// Creates a provider from configuration.
    ///
    /// # Errors
    /// - `MovieSearchError::Configuration` - Endpoint is not a valid URL or the
    ///   HTTP client could not be built
    pub fn new(config: &SearchConfig) -> Result<Self, MovieSearchError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|e| MovieSearchError::Configuration {
                reason: format!("Invalid endpoint '{}': {e}", config.endpoint),
            })?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| MovieSearchError::Configuration {
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// URL for one page of list results.
    fn search_url(&self, query: &SearchQuery, page: u32) -> Url {
        let mut url = self.base_url();
        url.query_pairs_mut()
            .append_pair("s", &query.title)
            .append_pair("type", query.media_type.map_or("", |t| t.as_str()))
            .append_pair("y", query.year.as_deref().unwrap_or(""))
            .append_pair("page", &page.to_string());
        url
    }

    /// URL for a single record lookup.
    fn detail_url(&self, imdb_id: &str) -> Url {
        let mut url = self.base_url();
        url.query_pairs_mut().append_pair("i", imdb_id);
        url
    }

    fn base_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.set_query(None);
        if let Some(ref api_key) = self.api_key {
            url.query_pairs_mut().append_pair("apikey", api_key);
        }
        url
    }

    /// Sends a GET and returns the decoded body, mapping backend errors.
    async fn get_json(&self, url: Url) -> Result<Value, MovieSearchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            MovieSearchError::Network {
                reason: e.without_url().to_string(),
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MovieSearchError::Network {
                reason: e.without_url().to_string(),
            })?;

        let status_error = || MovieSearchError::Network {
            reason: format!("Request failed with status code {}", status.as_u16()),
        };

        let value: Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => return Err(status_error()),
            Err(e) => {
                return Err(MovieSearchError::Parse {
                    reason: format!("JSON parsing failed: {e}"),
                });
            }
        };

        if let Some(error) = value.get("Error").and_then(Value::as_str) {
            return Err(MovieSearchError::Application {
                reason: error.to_string(),
            });
        }

        if !status.is_success() {
            return Err(status_error());
        }

        Ok(value)
    }
}

#[async_trait]
impl MovieSearchProvider for OmdbProvider {
    async fn search_page(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> Result<Page, MovieSearchError> {
        debug!(title = %query.title, page, "Requesting OMDb search page");

        let value = self.get_json(self.search_url(query, page)).await?;
        let response: OmdbSearchResponse =
            serde_json::from_value(value).map_err(|e| MovieSearchError::Parse {
                reason: format!("Unexpected search response: {e}"),
            })?;

        Ok(Page::new(
            response.search.unwrap_or_default(),
            response.total_results.unwrap_or_default(),
        ))
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, MovieSearchError> {
        debug!(imdb_id, "Requesting OMDb detail");

        let value = self.get_json(self.detail_url(imdb_id)).await?;
        serde_json::from_value(value).map_err(|e| MovieSearchError::Parse {
            reason: format!("Unexpected detail response: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MediaType;

    fn provider(api_key: Option<&str>) -> OmdbProvider {
        let config =
            SearchConfig::with_endpoint("https://www.omdbapi.com/", api_key.map(str::to_string));
        OmdbProvider::new(&config).unwrap()
    }

    #[test]
    fn test_search_url_carries_all_parameters() {
        let query = SearchQuery::new("the dark knight")
            .with_media_type(Some(MediaType::Movie))
            .with_year(Some("2008".to_string()));
        let url = provider(Some("key")).search_url(&query, 3);

        assert_eq!(
            url.as_str(),
            "https://www.omdbapi.com/?apikey=key&s=the+dark+knight&type=movie&y=2008&page=3"
        );
    }

    #[test]
    fn test_search_url_sends_empty_filters() {
        let query = SearchQuery::new("batman").with_media_type(None);
        let url = provider(None).search_url(&query, 1);

        assert_eq!(url.as_str(), "https://www.omdbapi.com/?s=batman&type=&y=&page=1");
    }

    #[test]
    fn test_detail_url() {
        let url = provider(Some("key")).detail_url("tt4520988");
        assert_eq!(url.as_str(), "https://www.omdbapi.com/?apikey=key&i=tt4520988");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = SearchConfig::with_endpoint("not a url", None);
        let error = OmdbProvider::new(&config).unwrap_err();
        assert!(matches!(error, MovieSearchError::Configuration { .. }));
    }
}
