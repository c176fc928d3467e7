//! Provider implementations for movie search backends.

use async_trait::async_trait;

use crate::errors::MovieSearchError;
use crate::types::{MovieDetail, Page, SearchQuery};

pub mod demo;
pub mod omdb;
#[cfg(any(test, feature = "test-utils"))]
pub mod scripted;

pub use demo::DemoProvider;
pub use omdb::OmdbProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use scripted::ScriptedProvider;

/// Trait for movie search backends.
///
/// Implementations normalize every failure into [`MovieSearchError`]: a
/// response whose body carries a backend error is a failure even when the
/// transport reported success. Retries and timeouts are the implementation's
/// own concern.
#[async_trait]
pub trait MovieSearchProvider: Send + Sync + std::fmt::Debug {
    /// Fetches one 1-based page of list results for `query`.
    ///
    /// # Errors
    /// - `MovieSearchError::Application` - Backend reported an error
    /// - `MovieSearchError::Network` - Request could not be completed
    /// - `MovieSearchError::Parse` - Response body could not be decoded
    async fn search_page(&self, query: &SearchQuery, page: u32)
    -> Result<Page, MovieSearchError>;

    /// Fetches the full record for one IMDb id.
    ///
    /// # Errors
    /// - `MovieSearchError::Application` - Backend reported an error
    /// - `MovieSearchError::Network` - Request could not be completed
    /// - `MovieSearchError::Parse` - Response body could not be decoded
    async fn fetch_detail(&self, imdb_id: &str) -> Result<MovieDetail, MovieSearchError>;
}
