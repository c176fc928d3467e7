//! CLI command implementations

use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Subcommand;
use moviescout_search::{
    DemoProvider, MediaType, MovieDetail, MovieSearchProvider, MovieSearchSession, OmdbProvider,
    SearchConfig, SearchOutcome, SearchQuery, SearchState,
};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search titles across as many pages as needed
    Search {
        /// Title keywords
        title: String,
        /// Media type filter
        #[arg(long = "type", value_parser = parse_media_type, default_value = "movie")]
        media_type: MediaType,
        /// Release year filter
        #[arg(short, long)]
        year: Option<String>,
        /// Number of results wanted (fetched in pages of 10)
        #[arg(short, long, default_value = "10")]
        count: u32,
    },
    /// Show the full record for one IMDb id
    Show {
        /// IMDb id, e.g. tt4520988
        imdb_id: String,
    },
}

/// Flags shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Use the offline demo catalogue
    pub demo: bool,
    /// Print state as JSON instead of text
    pub json: bool,
}

fn parse_media_type(value: &str) -> Result<MediaType, String> {
    value.parse()
}

/// Handle the CLI command
///
/// # Errors
/// - Provider configuration is invalid
/// - The search or lookup failed
pub async fn handle_command(command: Commands, options: RunOptions) -> anyhow::Result<()> {
    let session = MovieSearchSession::new(build_provider(options.demo)?);

    match command {
        Commands::Search {
            title,
            media_type,
            year,
            count,
        } => {
            let query = SearchQuery::new(title)
                .with_media_type(Some(media_type))
                .with_year(year)
                .with_desired_count(count);
            search(&session, &query, options.json).await
        }
        Commands::Show { imdb_id } => show(&session, &imdb_id, options.json).await,
    }
}

fn build_provider(demo: bool) -> anyhow::Result<Arc<dyn MovieSearchProvider>> {
    let config = SearchConfig::from_env();

    if demo || config.use_demo_data {
        tracing::info!("Using demo catalogue");
        return Ok(Arc::new(DemoProvider::new()));
    }

    if config.api_key.is_none() {
        tracing::warn!("OMDB_API_KEY is not set, OMDb will reject requests");
    }

    let provider = OmdbProvider::new(&config).context("Could not set up OMDb provider")?;
    Ok(Arc::new(provider))
}

async fn search(
    session: &MovieSearchSession,
    query: &SearchQuery,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = session.search_movies(query).await;
    let state = session.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print!("{}", render_results(&state));
    }

    match outcome {
        SearchOutcome::Failed => bail!("Search failed: {}", state.message),
        SearchOutcome::Skipped => bail!("Search skipped, session busy"),
        SearchOutcome::Completed { .. } => Ok(()),
    }
}

async fn show(session: &MovieSearchSession, imdb_id: &str, json: bool) -> anyhow::Result<()> {
    session.search_movie_with_id(imdb_id).await;

    let Some(detail) = session.snapshot().the_movie else {
        bail!("No movie found for id {imdb_id}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
    } else {
        print!("{}", render_detail(&detail));
    }
    Ok(())
}

/// Text listing of the results in `state`.
fn render_results(state: &SearchState) -> String {
    let mut out = String::new();

    if state.movies.is_empty() {
        let message = if state.message.is_empty() {
            "No results"
        } else {
            state.message.as_str()
        };
        let _ = writeln!(out, "{message}");
        return out;
    }

    for movie in &state.movies {
        let _ = writeln!(out, "{:<11} {:<9} {}", movie.imdb_id, movie.year, movie.title);
    }
    let _ = writeln!(out, "{} result(s)", state.movies.len());
    out
}

/// Text view of one detail record.
fn render_detail(detail: &MovieDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", detail.title, detail.year);
    let _ = writeln!(out, "  id:       {}", detail.imdb_id);

    let optional = [
        ("genre", &detail.genre),
        ("runtime", &detail.runtime),
        ("director", &detail.director),
        ("actors", &detail.actors),
        ("plot", &detail.plot),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            let _ = writeln!(out, "  {:<9} {value}", format!("{label}:"));
        }
    }

    if let Some(rating) = detail.rating() {
        let _ = writeln!(out, "  rating:   {rating}/10");
    }
    if let Some(poster) = detail.summary().poster_url() {
        let _ = writeln!(out, "  poster:   {poster}");
    }
    out
}

#[cfg(test)]
mod tests {
    use moviescout_search::{MovieSummary, StateUpdate};

    use super::*;

    #[test]
    fn test_render_results_lists_movies() {
        let mut state = SearchState::new();
        state.update_state(StateUpdate::new().movies(vec![
            MovieSummary::new("tt0372784", "Batman Begins"),
            MovieSummary::new("tt0468569", "The Dark Knight"),
        ]));

        let output = render_results(&state);

        assert!(output.contains("tt0372784"));
        assert!(output.contains("The Dark Knight"));
        assert!(output.ends_with("2 result(s)\n"));
    }

    #[test]
    fn test_render_results_shows_message_when_empty() {
        let mut state = SearchState::new();
        state.update_state(StateUpdate::new().message("Movie not found!"));
        assert_eq!(render_results(&state), "Movie not found!\n");

        state.update_state(StateUpdate::new().message(""));
        assert_eq!(render_results(&state), "No results\n");
    }

    #[test]
    fn test_render_detail_skips_missing_fields() {
        let detail = MovieDetail {
            imdb_id: "tt4520988".to_string(),
            title: "Frozen II".to_string(),
            year: "2019".to_string(),
            plot: Some("Elsa ventures north.".to_string()),
            imdb_rating: Some("6.8".to_string()),
            poster: "N/A".to_string(),
            ..Default::default()
        };

        let output = render_detail(&detail);

        assert!(output.starts_with("Frozen II (2019)\n"));
        assert!(output.contains("plot:     Elsa ventures north."));
        assert!(output.contains("rating:   6.8/10"));
        assert!(!output.contains("director"));
        assert!(!output.contains("poster"));
    }

    #[tokio::test]
    async fn test_demo_search_end_to_end() {
        let session = MovieSearchSession::new(build_provider(true).unwrap());
        let query = SearchQuery::new("batman").with_desired_count(20);

        search(&session, &query, false).await.unwrap();

        assert_eq!(session.snapshot().movies.len(), 13);
        assert!(show(&session, "tt0372784", false).await.is_ok());
        assert!(show(&session, "tt1", false).await.is_err());
    }
}
