//! Scripted provider implementation for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use super::MovieSearchProvider;
use crate::errors::MovieSearchError;
use crate::types::{MovieDetail, MovieSummary, Page, SearchQuery};

/// Provider returning canned responses per page and per id.
///
/// Records every request so tests can assert how many pages were fetched.
/// Unscripted pages and ids answer with OMDb's not-found errors.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    pages: HashMap<u32, Result<Page, MovieSearchError>>,
    details: HashMap<String, Result<MovieDetail, MovieSearchError>>,
    requested_pages: Mutex<Vec<u32>>,
    requested_ids: Mutex<Vec<String>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedProvider {
    /// Creates a provider with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the response for one page.
    pub fn with_page(mut self, page: u32, response: Result<Page, MovieSearchError>) -> Self {
        self.pages.insert(page, response);
        self
    }

    /// Scripts a successful page holding summaries with the given ids.
    pub fn with_results(self, page: u32, ids: &[&str], total_results: &str) -> Self {
        let results = ids
            .iter()
            .map(|id| MovieSummary::new(*id, format!("Movie {id}")))
            .collect();
        self.with_page(page, Ok(Page::new(results, total_results)))
    }

    /// Scripts a network failure for one page.
    pub fn with_network_failure(self, page: u32, reason: &str) -> Self {
        self.with_page(
            page,
            Err(MovieSearchError::Network {
                reason: reason.to_string(),
            }),
        )
    }

    /// Scripts the response for one id lookup.
    pub fn with_detail(
        mut self,
        imdb_id: &str,
        response: Result<MovieDetail, MovieSearchError>,
    ) -> Self {
        self.details.insert(imdb_id.to_string(), response);
        self
    }

    /// Makes every request wait for a permit on the returned handle.
    ///
    /// Call `notify_one` once per request to let it through.
    pub fn gated(mut self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Pages requested so far, in order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested_pages.lock().clone()
    }

    /// Ids looked up so far, in order.
    pub fn requested_ids(&self) -> Vec<String> {
        self.requested_ids.lock().clone()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl MovieSearchProvider for ScriptedProvider {
    async fn search_page(
        &self,
        _query: &SearchQuery,
        page: u32,
    ) -> Result<Page, MovieSearchError> {
        self.requested_pages.lock().push(page);
        self.wait_for_gate().await;

        self.pages.get(&page).cloned().unwrap_or_else(|| {
            Err(MovieSearchError::Application {
                reason: "Movie not found!".to_string(),
            })
        })
    }

    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, MovieSearchError> {
        self.requested_ids.lock().push(imdb_id.to_string());
        self.wait_for_gate().await;

        self.details.get(imdb_id).cloned().unwrap_or_else(|| {
            Err(MovieSearchError::Application {
                reason: "Incorrect IMDb ID.".to_string(),
            })
        })
    }
}
