//! MovieScout Search - Paginated movie search aggregation

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Turns a keyword query against the paginated OMDb API into a single
//! deduplicated result list, held in a session-owned state container that
//! UI code reads through snapshots.

pub mod config;
pub mod errors;
pub mod pagination;
pub mod providers;
pub mod session;
pub mod state;
pub mod types;

// Re-export main types
pub use config::SearchConfig;
pub use errors::MovieSearchError;
pub use pagination::{FetchPhase, PAGE_SIZE, PageCursor};
#[cfg(any(test, feature = "test-utils"))]
pub use providers::ScriptedProvider;
pub use providers::{DemoProvider, MovieSearchProvider, OmdbProvider};
pub use session::{MovieSearchSession, SearchOutcome};
pub use state::{DEFAULT_MESSAGE, SearchState, StateUpdate};
pub use types::{MediaType, MovieDetail, MovieSummary, Page, Rating, SearchQuery};

/// Convenience type alias for Results with MovieSearchError.
pub type Result<T> = std::result::Result<T, MovieSearchError>;
