//! HTTP provider against a local OMDb stand-in.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use moviescout_search::{
    MovieSearchError, MovieSearchProvider, MovieSearchSession, OmdbProvider, SearchConfig,
    SearchOutcome, SearchQuery,
};
use serde_json::{Value, json};

const API_KEY: &str = "test-key";

fn summary(id: &str, title: &str) -> Value {
    json!({ "Title": title, "Year": "2005", "imdbID": id, "Type": "movie", "Poster": "N/A" })
}

async fn omdb(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("apikey").map(String::as_str) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "Response": "False", "Error": "Invalid API key!" })),
        )
            .into_response();
    }

    if let Some(id) = params.get("i") {
        return match id.as_str() {
            "tt4520988" => axum::Json(json!({
                "Title": "Frozen II", "Year": "2019", "imdbID": "tt4520988", "Type": "movie",
                "Poster": "N/A", "Plot": "Elsa ventures north.", "imdbRating": "6.8",
                "Response": "True"
            }))
            .into_response(),
            _ => axum::Json(json!({ "Response": "False", "Error": "Incorrect IMDb ID." }))
                .into_response(),
        };
    }

    let title = params.get("s").map(String::as_str).unwrap_or("");
    let page = params.get("page").map(String::as_str).unwrap_or("1");
    match (title, page) {
        ("batman", "1") => axum::Json(json!({
            "Search": [summary("a", "Batman"), summary("b", "Batman Returns"), summary("a", "Batman")],
            "totalResults": "15",
            "Response": "True"
        }))
        .into_response(),
        ("batman", "2") => axum::Json(json!({
            "Search": [summary("b", "Batman Returns"), summary("c", "Batman Forever")],
            "totalResults": "15",
            "Response": "True"
        }))
        .into_response(),
        ("empty", _) => axum::Json(json!({ "totalResults": "0", "Response": "True" })).into_response(),
        ("broken", _) => (StatusCode::INTERNAL_SERVER_ERROR, "oops").into_response(),
        ("garbled", _) => "this is not json".into_response(),
        _ => axum::Json(json!({ "Response": "False", "Error": "Movie not found!" })).into_response(),
    }
}

/// Starts the stand-in server and returns its base URL.
async fn spawn_omdb() -> String {
    let app = Router::new().route("/", get(omdb));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

async fn provider(api_key: &str) -> OmdbProvider {
    let endpoint = spawn_omdb().await;
    OmdbProvider::new(&SearchConfig::with_endpoint(endpoint, Some(api_key.to_string()))).unwrap()
}

#[tokio::test]
async fn test_multi_page_search_over_http() {
    let session = MovieSearchSession::new(Arc::new(provider(API_KEY).await));

    let outcome = session
        .search_movies(
            &SearchQuery::new("batman")
                .with_media_type(None)
                .with_desired_count(20),
        )
        .await;

    assert_eq!(outcome, SearchOutcome::Completed { pages: 2 });
    assert_eq!(session.movie_ids(), vec!["a", "b", "c"]);
    assert_eq!(session.snapshot().message, "");
}

#[tokio::test]
async fn test_empty_search_is_not_an_error() {
    let provider = provider(API_KEY).await;

    let page = provider
        .search_page(&SearchQuery::new("empty"), 1)
        .await
        .unwrap();

    assert!(page.results.is_empty());
    assert_eq!(page.total_results, "0");
}

#[tokio::test]
async fn test_backend_error_surfaces_text() {
    let session = MovieSearchSession::new(Arc::new(provider(API_KEY).await));

    session.search_movies(&SearchQuery::new("nothing")).await;

    assert_eq!(session.snapshot().message, "Movie not found!");
}

#[tokio::test]
async fn test_error_body_wins_over_status() {
    let provider = provider("wrong-key").await;

    let error = provider
        .search_page(&SearchQuery::new("batman"), 1)
        .await
        .unwrap_err();

    assert_eq!(
        error,
        MovieSearchError::Application {
            reason: "Invalid API key!".to_string()
        }
    );
}

#[tokio::test]
async fn test_failure_status_without_error_body() {
    let provider = provider(API_KEY).await;

    let error = provider
        .search_page(&SearchQuery::new("broken"), 1)
        .await
        .unwrap_err();

    assert_eq!(error.user_message(), "Request failed with status code 500");
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let provider = provider(API_KEY).await;

    let error = provider
        .search_page(&SearchQuery::new("garbled"), 1)
        .await
        .unwrap_err();

    assert!(matches!(error, MovieSearchError::Parse { .. }));
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);
    let provider = OmdbProvider::new(&SearchConfig::with_endpoint(endpoint, None)).unwrap();

    let error = provider
        .search_page(&SearchQuery::new("batman"), 1)
        .await
        .unwrap_err();

    assert!(matches!(error, MovieSearchError::Network { .. }));
}

#[tokio::test]
async fn test_detail_lookup_over_http() {
    let session = MovieSearchSession::new(Arc::new(provider(API_KEY).await));

    session.search_movie_with_id("tt4520988").await;
    let detail = session.snapshot().the_movie.unwrap();
    assert_eq!(detail.title, "Frozen II");
    assert_eq!(detail.rating(), Some(6.8));

    assert_eq!(
        session.search_movie_with_id("tt0000000").await,
        SearchOutcome::Failed
    );
    assert_eq!(session.snapshot().the_movie, None);
}
