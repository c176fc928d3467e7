//! Session-owned search state and its mutation operations.

use serde::Serialize;

use crate::types::{MovieDetail, MovieSummary};

/// Message shown before any search and after a reset.
pub const DEFAULT_MESSAGE: &str = "Search for the movie title!";

/// Current search results, status message, busy flag and detail slot.
///
/// Mutated only through [`SearchState::update_state`] and
/// [`SearchState::reset_movies`]. `movies` never holds two entries with the
/// same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchState {
    /// Deduplicated results in first-seen order
    pub movies: Vec<MovieSummary>,
    /// Status text; empty during a search, error text after a failed one
    pub message: String,
    /// True while exactly one operation is in flight
    pub loading: bool,
    /// Detail record from the last successful lookup by id
    pub the_movie: Option<MovieDetail>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            movies: Vec::new(),
            message: DEFAULT_MESSAGE.to_string(),
            loading: false,
            the_movie: None,
        }
    }
}

impl SearchState {
    /// Creates the initial state for a new session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the fields present in `update`, leaving the rest unchanged.
    pub fn update_state(&mut self, update: StateUpdate) {
        let StateUpdate {
            movies,
            message,
            loading,
            the_movie,
        } = update;

        if let Some(movies) = movies {
            self.movies = movies;
        }
        if let Some(message) = message {
            self.message = message;
        }
        if let Some(loading) = loading {
            self.loading = loading;
        }
        if let Some(the_movie) = the_movie {
            self.the_movie = the_movie;
        }
    }

    /// Clears results, restores the default message and drops the busy flag.
    pub fn reset_movies(&mut self) {
        self.movies.clear();
        self.message = DEFAULT_MESSAGE.to_string();
        self.loading = false;
    }

    /// Ids of the current results, in display order.
    pub fn movie_ids(&self) -> Vec<String> {
        self.movies.iter().map(|m| m.imdb_id.clone()).collect()
    }
}

/// Typed partial update for [`SearchState`].
///
/// Every field is optional; `None` means "leave unchanged". For `the_movie`,
/// `Some(None)` clears the detail slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    /// Replacement result list
    pub movies: Option<Vec<MovieSummary>>,
    /// Replacement status message
    pub message: Option<String>,
    /// Replacement busy flag
    pub loading: Option<bool>,
    /// Replacement detail slot
    pub the_movie: Option<Option<MovieDetail>>,
}

impl StateUpdate {
    /// Creates an update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the result list.
    pub fn movies(mut self, movies: Vec<MovieSummary>) -> Self {
        self.movies = Some(movies);
        self
    }

    /// Sets the status message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the busy flag.
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = Some(loading);
        self
    }

    /// Sets or clears the detail slot.
    pub fn the_movie(mut self, the_movie: Option<MovieDetail>) -> Self {
        self.the_movie = Some(the_movie);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summaries(ids: &[&str]) -> Vec<MovieSummary> {
        ids.iter().map(|id| MovieSummary::new(*id, "title")).collect()
    }

    #[test]
    fn test_initial_state() {
        let state = SearchState::new();

        assert!(state.movies.is_empty());
        assert_eq!(state.message, DEFAULT_MESSAGE);
        assert!(!state.loading);
        assert_eq!(state.the_movie, None);
    }

    #[test]
    fn test_update_state_only_touches_given_fields() {
        let mut state = SearchState::new();
        state.update_state(StateUpdate::new().movies(summaries(&["a", "b"])));
        state.update_state(StateUpdate::new().message("").loading(true));

        assert_eq!(state.movie_ids(), vec!["a", "b"]);
        assert_eq!(state.message, "");
        assert!(state.loading);
        assert_eq!(state.the_movie, None);
    }

    #[test]
    fn test_update_state_clears_detail_slot() {
        let mut state = SearchState::new();
        state.update_state(StateUpdate::new().the_movie(Some(MovieDetail::default())));
        assert!(state.the_movie.is_some());

        state.update_state(StateUpdate::new().the_movie(None));
        assert_eq!(state.the_movie, None);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut state = SearchState::new();
        state.update_state(StateUpdate::new().movies(summaries(&["a"])).message("x"));
        let before = state.clone();

        state.update_state(StateUpdate::new());
        assert_eq!(state, before);
    }

    #[test]
    fn test_reset_movies() {
        let mut state = SearchState::new();
        state.update_state(
            StateUpdate::new()
                .movies(summaries(&["a"]))
                .message("Movie not found!")
                .loading(true)
                .the_movie(Some(MovieDetail::default())),
        );

        state.reset_movies();

        assert!(state.movies.is_empty());
        assert_eq!(state.message, DEFAULT_MESSAGE);
        assert!(!state.loading);
        // Detail slot is outside the reset
        assert!(state.the_movie.is_some());
    }
}
