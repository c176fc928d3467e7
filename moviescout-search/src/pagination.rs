//! Page cursor and result merging for multi-page searches.
//!
//! The cursor is a small state machine that decides which page to fetch next.
//! The total page count is taken from the first page only; later pages never
//! extend or shrink the plan.

use std::collections::HashSet;

use crate::types::MovieSummary;

/// Results per page served by the backend.
pub const PAGE_SIZE: u32 = 10;

/// Where a multi-page fetch currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Nothing requested yet
    Idle,
    /// Waiting for the given 1-based page
    FetchingPage(u32),
    /// A page failed; no further pages will be requested
    Failed,
    /// Every planned page arrived
    Completed,
}

/// Sequential page planner for one search.
#[derive(Debug, Clone)]
pub struct PageCursor {
    phase: FetchPhase,
    page_cap: u32,
    total_pages: Option<u32>,
}

impl PageCursor {
    /// Creates a cursor that stops after `desired_count / PAGE_SIZE` pages.
    ///
    /// The first page is always requested, even when the cap is zero.
    pub fn new(desired_count: u32) -> Self {
        Self {
            phase: FetchPhase::Idle,
            page_cap: desired_count / PAGE_SIZE,
            total_pages: None,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Total pages reported by the first page, once known.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Moves from `Idle` to fetching page 1 and returns the phase.
    pub fn begin(&mut self) -> FetchPhase {
        if self.phase == FetchPhase::Idle {
            self.phase = FetchPhase::FetchingPage(1);
        }
        self.phase
    }

    /// Records a successful page and returns the next phase.
    ///
    /// `total_results` is only consulted for the first page.
    pub fn record_page(&mut self, total_results: u32) -> FetchPhase {
        let FetchPhase::FetchingPage(current) = self.phase else {
            return self.phase;
        };

        let total_pages = *self
            .total_pages
            .get_or_insert_with(|| total_pages_for(total_results));
        let next = current + 1;

        self.phase = if next <= total_pages && next <= self.page_cap {
            FetchPhase::FetchingPage(next)
        } else {
            FetchPhase::Completed
        };
        self.phase
    }

    /// Records a failed page. Terminal.
    pub fn record_failure(&mut self) -> FetchPhase {
        if matches!(self.phase, FetchPhase::FetchingPage(_)) {
            self.phase = FetchPhase::Failed;
        }
        self.phase
    }
}

/// Number of pages needed for `total_results` items.
pub fn total_pages_for(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}

/// Parses the backend's textual total, treating anything unparseable as zero.
pub fn parse_total_results(raw: &str) -> u32 {
    match raw.trim().parse() {
        Ok(total) => total,
        Err(_) => {
            if !raw.is_empty() {
                tracing::warn!("Unparseable totalResults {raw:?}, assuming 0");
            }
            0
        }
    }
}

/// Keeps the first record for each id, preserving order.
pub fn dedup_by_id(movies: Vec<MovieSummary>) -> Vec<MovieSummary> {
    let mut merged = Vec::with_capacity(movies.len());
    merge_unique(&mut merged, movies);
    merged
}

/// Appends records from `page` whose ids are not yet in `accumulated`.
///
/// Returns how many records were appended.
pub fn merge_unique(accumulated: &mut Vec<MovieSummary>, page: Vec<MovieSummary>) -> usize {
    let mut seen: HashSet<String> = accumulated.iter().map(|m| m.imdb_id.clone()).collect();
    let before = accumulated.len();

    for movie in page {
        if seen.insert(movie.imdb_id.clone()) {
            accumulated.push(movie);
        }
    }

    accumulated.len() - before
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn summaries(ids: &[&str]) -> Vec<MovieSummary> {
        ids.iter().map(|id| MovieSummary::new(*id, *id)).collect()
    }

    fn ids(movies: &[MovieSummary]) -> Vec<&str> {
        movies.iter().map(|m| m.imdb_id.as_str()).collect()
    }

    /// Drives a cursor to completion and returns the pages it asked for.
    fn planned_pages(desired_count: u32, total_results: u32) -> Vec<u32> {
        let mut cursor = PageCursor::new(desired_count);
        let mut pages = Vec::new();
        let mut phase = cursor.begin();
        while let FetchPhase::FetchingPage(page) = phase {
            pages.push(page);
            phase = cursor.record_page(total_results);
        }
        pages
    }

    #[test]
    fn test_single_page_result() {
        assert_eq!(planned_pages(10, 2), vec![1]);
        assert_eq!(planned_pages(30, 0), vec![1]);
    }

    #[test]
    fn test_pages_limited_by_backend_total() {
        assert_eq!(planned_pages(100, 25), vec![1, 2, 3]);
    }

    #[test]
    fn test_pages_limited_by_desired_count() {
        assert_eq!(planned_pages(30, 325), vec![1, 2, 3]);
        // Partial last page is truncated
        assert_eq!(planned_pages(25, 325), vec![1, 2]);
    }

    #[test]
    fn test_first_page_always_fetched() {
        assert_eq!(planned_pages(0, 325), vec![1]);
        assert_eq!(planned_pages(5, 325), vec![1]);
    }

    #[test]
    fn test_total_fixed_by_first_page() {
        let mut cursor = PageCursor::new(50);
        cursor.begin();
        assert_eq!(cursor.record_page(20), FetchPhase::FetchingPage(2));
        // A later page reporting a larger total does not extend the plan
        assert_eq!(cursor.record_page(500), FetchPhase::Completed);
        assert_eq!(cursor.total_pages(), Some(2));
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut cursor = PageCursor::new(50);
        assert_eq!(cursor.record_failure(), FetchPhase::Idle);
        cursor.begin();
        cursor.record_page(50);
        assert_eq!(cursor.record_failure(), FetchPhase::Failed);
        assert_eq!(cursor.record_page(50), FetchPhase::Failed);
        assert_eq!(cursor.begin(), FetchPhase::Failed);
    }

    #[test]
    fn test_parse_total_results() {
        assert_eq!(parse_total_results("325"), 325);
        assert_eq!(parse_total_results(" 7 "), 7);
        assert_eq!(parse_total_results(""), 0);
        assert_eq!(parse_total_results("lots"), 0);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let mut movies = summaries(&["a", "b", "a", "c", "b"]);
        movies[2].title = "duplicate".to_string();

        let deduped = dedup_by_id(movies);
        assert_eq!(ids(&deduped), vec!["a", "b", "c"]);
        assert_eq!(deduped[0].title, "a");
    }

    #[test]
    fn test_merge_unique_against_accumulated() {
        let mut accumulated = summaries(&["a", "b"]);
        let added = merge_unique(&mut accumulated, summaries(&["b", "c", "c", "d"]));

        assert_eq!(added, 2);
        assert_eq!(ids(&accumulated), vec!["a", "b", "c", "d"]);
    }

    proptest! {
        #[test]
        fn prop_merge_never_duplicates(pages in prop::collection::vec(
            prop::collection::vec(0u8..20, 0..12), 0..6)
        ) {
            let mut accumulated = Vec::new();
            for page in pages {
                let page: Vec<MovieSummary> = page
                    .into_iter()
                    .map(|n| MovieSummary::new(format!("tt{n}"), "x"))
                    .collect();
                merge_unique(&mut accumulated, page);
            }

            let unique: HashSet<&str> = accumulated.iter().map(|m| m.imdb_id.as_str()).collect();
            prop_assert_eq!(unique.len(), accumulated.len());
        }

        #[test]
        fn prop_page_plan_respects_caps(desired in 0u32..200, total in 0u32..1000) {
            let pages = planned_pages(desired, total);
            let cap = (desired / PAGE_SIZE).min(total_pages_for(total)).max(1);

            prop_assert_eq!(pages.len() as u32, cap);
            prop_assert!(pages.iter().copied().eq(1..=cap));
        }
    }
}
