//! Session orchestration against scripted providers.

use std::sync::Arc;

use moviescout_search::{
    DEFAULT_MESSAGE, MovieSearchError, MovieSearchSession, ScriptedProvider, SearchOutcome,
    SearchQuery,
};

fn session(provider: ScriptedProvider) -> (Arc<MovieSearchSession>, Arc<ScriptedProvider>) {
    let provider = Arc::new(provider);
    let session = Arc::new(MovieSearchSession::new(provider.clone()));
    (session, provider)
}

#[tokio::test]
async fn test_batman_single_page() {
    let (session, provider) =
        session(ScriptedProvider::new().with_results(1, &["a", "b"], "2"));

    session
        .search_movies(&SearchQuery::new("batman").with_desired_count(30))
        .await;

    let state = session.snapshot();
    assert_eq!(session.movie_ids(), vec!["a", "b"]);
    assert_eq!(state.message, "");
    assert!(!state.loading);
    assert_eq!(provider.requested_pages(), vec![1]);
}

#[tokio::test]
async fn test_second_page_timeout_discards_everything() {
    let page_one: Vec<String> = (0..10).map(|i| format!("tt{i}")).collect();
    let page_one: Vec<&str> = page_one.iter().map(String::as_str).collect();
    let (session, provider) = session(
        ScriptedProvider::new()
            .with_results(1, &page_one, "15")
            .with_network_failure(2, "timeout"),
    );

    let outcome = session
        .search_movies(&SearchQuery::new("batman").with_desired_count(20))
        .await;

    assert_eq!(outcome, SearchOutcome::Failed);
    let state = session.snapshot();
    assert!(state.movies.is_empty());
    assert_eq!(state.message, "timeout");
    assert!(!state.loading);
    assert_eq!(provider.requested_pages(), vec![1, 2]);
}

#[tokio::test]
async fn test_detail_error_keeps_message() {
    let (session, _) = session(ScriptedProvider::new().with_detail(
        "tt1",
        Err(MovieSearchError::Application {
            reason: "Incorrect IMDb ID.".to_string(),
        }),
    ));

    let outcome = session.search_movie_with_id("tt1").await;

    assert_eq!(outcome, SearchOutcome::Failed);
    let state = session.snapshot();
    assert_eq!(state.the_movie, None);
    assert!(!state.loading);
    assert_eq!(state.message, DEFAULT_MESSAGE);
}

#[tokio::test]
async fn test_concurrent_calls_are_dropped_not_queued() {
    let (provider, gate) = ScriptedProvider::new()
        .with_results(1, &["a", "b"], "12")
        .with_results(2, &["c"], "12")
        .gated();
    let (session, provider) = session(provider);

    let running = {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            session
                .search_movies(&SearchQuery::new("batman").with_desired_count(20))
                .await
        })
    };

    while !session.is_loading() {
        tokio::task::yield_now().await;
    }
    let before = session.snapshot();

    assert_eq!(
        session.search_movies(&SearchQuery::new("superman")).await,
        SearchOutcome::Skipped
    );
    assert_eq!(
        session.search_movie_with_id("tt0372784").await,
        SearchOutcome::Skipped
    );
    assert_eq!(session.snapshot(), before);

    gate.notify_one();
    while provider.requested_pages().len() < 2 {
        tokio::task::yield_now().await;
    }
    gate.notify_one();

    assert_eq!(
        running.await.unwrap(),
        SearchOutcome::Completed { pages: 2 }
    );
    assert_eq!(session.movie_ids(), vec!["a", "b", "c"]);
    assert!(!session.is_loading());
    assert!(provider.requested_ids().is_empty());
}

#[tokio::test]
async fn test_reset_after_failed_search() {
    let (session, _) = session(ScriptedProvider::new());

    session.search_movies(&SearchQuery::new("nothing")).await;
    assert_eq!(session.snapshot().message, "Movie not found!");

    session.reset_movies();

    let state = session.snapshot();
    assert!(state.movies.is_empty());
    assert_eq!(state.message, DEFAULT_MESSAGE);
    assert!(!state.loading);
}

#[tokio::test]
async fn test_session_reusable_after_failure() {
    let (session, _) = session(
        ScriptedProvider::new()
            .with_results(1, &["a"], "1")
            .with_detail("a", Ok(Default::default())),
    );

    session.search_movie_with_id("missing").await;
    let outcome = session.search_movies(&SearchQuery::new("a")).await;

    assert_eq!(outcome, SearchOutcome::Completed { pages: 1 });
    assert_eq!(
        session.search_movie_with_id("a").await,
        SearchOutcome::Completed { pages: 1 }
    );
    assert!(session.snapshot().the_movie.is_some());
}
