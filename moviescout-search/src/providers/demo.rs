//! Demo provider implementation for development without network access.

use async_trait::async_trait;

use super::MovieSearchProvider;
use crate::errors::MovieSearchError;
use crate::pagination::PAGE_SIZE;
use crate::types::{MediaType, MovieDetail, MovieSummary, Page, SearchQuery};

/// (imdb id, title, year, type)
const CATALOGUE: &[(&str, &str, &str, MediaType)] = &[
    ("tt0372784", "Batman Begins", "2005", MediaType::Movie),
    ("tt0468569", "The Dark Knight", "2008", MediaType::Movie),
    ("tt1345836", "The Dark Knight Rises", "2012", MediaType::Movie),
    ("tt0096895", "Batman", "1989", MediaType::Movie),
    ("tt0103776", "Batman Returns", "1992", MediaType::Movie),
    ("tt0112462", "Batman Forever", "1995", MediaType::Movie),
    ("tt0118688", "Batman & Robin", "1997", MediaType::Movie),
    ("tt2975590", "Batman v Superman: Dawn of Justice", "2016", MediaType::Movie),
    ("tt4116284", "The Lego Batman Movie", "2017", MediaType::Movie),
    ("tt1877830", "The Batman", "2022", MediaType::Movie),
    ("tt0106364", "Batman: Mask of the Phantasm", "1993", MediaType::Movie),
    ("tt4853102", "Batman: The Killing Joke", "2016", MediaType::Movie),
    ("tt1569923", "Batman: Under the Red Hood", "2010", MediaType::Movie),
    ("tt1672723", "Batman: Year One", "2011", MediaType::Movie),
    ("tt0060153", "Batman: The Movie", "1966", MediaType::Movie),
    ("tt0103359", "Batman: The Animated Series", "1992–1995", MediaType::Series),
    ("tt0059968", "Batman", "1966–1968", MediaType::Series),
    ("tt2294629", "Frozen", "2013", MediaType::Movie),
    ("tt4520988", "Frozen II", "2019", MediaType::Movie),
    ("tt0816692", "Interstellar", "2014", MediaType::Movie),
    ("tt0133093", "The Matrix", "1999", MediaType::Movie),
    ("tt1375666", "Inception", "2010", MediaType::Movie),
];

/// Offline provider serving a small built-in catalogue.
///
/// Mirrors OMDb paging and error texts so the whole search workflow can be
/// exercised without an API key.
#[derive(Debug, Default)]
pub struct DemoProvider;

impl DemoProvider {
    /// Creates the demo provider.
    pub fn new() -> Self {
        Self
    }

    fn summary((imdb_id, title, year, media_type): &(&str, &str, &str, MediaType)) -> MovieSummary {
        MovieSummary {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: year.to_string(),
            media_type: media_type.as_str().to_string(),
            poster: "N/A".to_string(),
        }
    }

    fn matches(query: &SearchQuery, entry: &(&str, &str, &str, MediaType)) -> bool {
        let (_, title, year, media_type) = entry;
        title.to_lowercase().contains(&query.title.to_lowercase())
            && query.media_type.is_none_or(|t| t == *media_type)
            && query.year.as_deref().is_none_or(|y| year.starts_with(y))
    }
}

#[async_trait]
impl MovieSearchProvider for DemoProvider {
    async fn search_page(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> Result<Page, MovieSearchError> {
        if query.title.trim().is_empty() {
            return Err(MovieSearchError::Application {
                reason: "Incorrect IMDb ID.".to_string(),
            });
        }

        let found: Vec<MovieSummary> = CATALOGUE
            .iter()
            .filter(|entry| Self::matches(query, entry))
            .map(Self::summary)
            .collect();

        let start = page.saturating_sub(1) as usize * PAGE_SIZE as usize;
        if page == 0 || start >= found.len() {
            return Err(MovieSearchError::Application {
                reason: "Movie not found!".to_string(),
            });
        }

        let total = found.len();
        let results = found
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE as usize)
            .collect();

        Ok(Page::new(results, total.to_string()))
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, MovieSearchError> {
        let entry = CATALOGUE
            .iter()
            .find(|(id, ..)| *id == imdb_id)
            .ok_or_else(|| MovieSearchError::Application {
                reason: "Incorrect IMDb ID.".to_string(),
            })?;

        let summary = Self::summary(entry);
        Ok(MovieDetail {
            imdb_id: summary.imdb_id,
            title: summary.title.clone(),
            year: summary.year,
            media_type: summary.media_type,
            poster: summary.poster,
            plot: Some(format!("Demo plot for {}.", summary.title)),
            imdb_rating: Some("N/A".to_string()),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_pages() {
        let provider = DemoProvider::new();
        let query = SearchQuery::new("batman").with_media_type(None);

        let first = provider.search_page(&query, 1).await.unwrap();
        assert_eq!(first.results.len(), 10);
        assert_eq!(first.total_results, "15");

        let second = provider.search_page(&query, 2).await.unwrap();
        assert_eq!(second.results.len(), 5);

        let error = provider.search_page(&query, 3).await.unwrap_err();
        assert_eq!(error.user_message(), "Movie not found!");
    }

    #[tokio::test]
    async fn test_demo_filters() {
        let provider = DemoProvider::new();
        let series = SearchQuery::new("BATMAN").with_media_type(Some(MediaType::Series));
        let page = provider.search_page(&series, 1).await.unwrap();
        assert_eq!(page.total_results, "2");

        let by_year = SearchQuery::new("frozen").with_year(Some("2019".to_string()));
        let page = provider.search_page(&by_year, 1).await.unwrap();
        assert_eq!(page.results[0].imdb_id, "tt4520988");
    }

    #[tokio::test]
    async fn test_demo_detail() {
        let provider = DemoProvider::new();

        let detail = provider.fetch_detail("tt4520988").await.unwrap();
        assert_eq!(detail.title, "Frozen II");

        let error = provider.fetch_detail("tt1").await.unwrap_err();
        assert_eq!(error.user_message(), "Incorrect IMDb ID.");
    }
}
