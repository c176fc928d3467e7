//! Search session: owns the state and runs searches against a provider.
//!
//! `loading` doubles as the mutual-exclusion guard between
//! [`MovieSearchSession::search_movies`] and
//! [`MovieSearchSession::search_movie_with_id`]. The check and the set happen
//! under one lock acquisition; a call that finds it set is dropped, never
//! queued. The state lock is never held across an await.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::pagination::{FetchPhase, PageCursor, dedup_by_id, merge_unique, parse_total_results};
use crate::providers::MovieSearchProvider;
use crate::state::{SearchState, StateUpdate};
use crate::types::SearchQuery;

/// How a session operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Another operation was in flight; nothing changed
    Skipped,
    /// Finished successfully after fetching this many pages
    Completed {
        /// Number of provider requests made
        pages: u32,
    },
    /// A request failed; state holds the failure shape
    Failed,
}

/// One user's search session.
///
/// Cheap to share behind an `Arc`; UI code reads state through
/// [`MovieSearchSession::snapshot`].
#[derive(Debug)]
pub struct MovieSearchSession {
    provider: Arc<dyn MovieSearchProvider>,
    state: Mutex<SearchState>,
}

/// Clears `loading` when dropped, so a cancelled operation cannot wedge the
/// session.
struct LoadingGuard<'a> {
    state: &'a Mutex<SearchState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .update_state(StateUpdate::new().loading(false));
    }
}

impl MovieSearchSession {
    /// Creates a session with fresh state.
    pub fn new(provider: Arc<dyn MovieSearchProvider>) -> Self {
        Self {
            provider,
            state: Mutex::new(SearchState::new()),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> SearchState {
        self.state.lock().clone()
    }

    /// Ids of the current results, in display order.
    pub fn movie_ids(&self) -> Vec<String> {
        self.state.lock().movie_ids()
    }

    /// Whether an operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }

    /// Applies a partial update to the state.
    pub fn update_state(&self, update: StateUpdate) {
        self.state.lock().update_state(update);
    }

    /// Clears results and restores the default message.
    pub fn reset_movies(&self) {
        self.state.lock().reset_movies();
    }

    /// Claims the session for one operation, applying `start` atomically.
    fn try_begin(&self, start: StateUpdate) -> Option<LoadingGuard<'_>> {
        let mut state = self.state.lock();
        if state.loading {
            return None;
        }
        state.update_state(start.loading(true));
        Some(LoadingGuard { state: &self.state })
    }

    /// Searches all pages for `query` up to its desired count.
    ///
    /// Pages are fetched one after another; each page is merged into the
    /// results with duplicates dropped and committed before the next request.
    /// The first failure empties the results and stores its text in
    /// `message`.
    pub async fn search_movies(&self, query: &SearchQuery) -> SearchOutcome {
        let Some(_guard) = self.try_begin(StateUpdate::new().message("")) else {
            warn!(title = %query.title, "Search dropped, another request is in flight");
            return SearchOutcome::Skipped;
        };

        let mut cursor = PageCursor::new(query.desired_count);
        let mut movies = Vec::new();
        let mut pages = 0;
        let mut phase = cursor.begin();

        while let FetchPhase::FetchingPage(page) = phase {
            pages += 1;
            match self.provider.search_page(query, page).await {
                Ok(result) => {
                    if page == 1 {
                        movies = dedup_by_id(result.results);
                    } else {
                        let added = merge_unique(&mut movies, result.results);
                        debug!(page, added, "Merged search page");
                    }
                    self.update_state(StateUpdate::new().movies(movies.clone()));
                    phase = cursor.record_page(parse_total_results(&result.total_results));
                }
                Err(error) => {
                    warn!(title = %query.title, page, %error, "Search page failed");
                    self.update_state(
                        StateUpdate::new()
                            .movies(Vec::new())
                            .message(error.user_message()),
                    );
                    phase = cursor.record_failure();
                }
            }
        }

        if phase == FetchPhase::Failed {
            return SearchOutcome::Failed;
        }

        info!(
            title = %query.title,
            pages,
            results = movies.len(),
            "Search completed"
        );
        SearchOutcome::Completed { pages }
    }

    /// Looks up one item by IMDb id into the detail slot.
    ///
    /// Failures clear the detail slot but leave `message` untouched.
    pub async fn search_movie_with_id(&self, imdb_id: &str) -> SearchOutcome {
        let Some(_guard) = self.try_begin(StateUpdate::new().the_movie(None)) else {
            warn!(imdb_id, "Lookup dropped, another request is in flight");
            return SearchOutcome::Skipped;
        };

        match self.provider.fetch_detail(imdb_id).await {
            Ok(detail) => {
                debug!(imdb_id, title = %detail.title, "Lookup completed");
                self.update_state(StateUpdate::new().the_movie(Some(detail)));
                SearchOutcome::Completed { pages: 1 }
            }
            Err(error) => {
                warn!(imdb_id, %error, "Lookup failed");
                self.update_state(StateUpdate::new().the_movie(None));
                SearchOutcome::Failed
            }
        }
    }
}
