//! Data types for movie search functionality.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder OMDb uses for fields it has no value for.
const NOT_AVAILABLE: &str = "N/A";

/// Media type filter accepted by the list search endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Feature films
    #[default]
    Movie,
    /// TV series
    Series,
    /// Single TV episodes
    Episode,
}

impl MediaType {
    /// Returns the value sent as the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "series" => Ok(MediaType::Series),
            "episode" => Ok(MediaType::Episode),
            _ => Err(format!("Invalid media type: {s}")),
        }
    }
}

/// List-view record returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieSummary {
    /// IMDb identifier, unique per item
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Title of the media item
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Release year, or a range like "2019–2021" for series
    #[serde(rename = "Year", default)]
    pub year: String,
    /// Media type as reported by the backend
    #[serde(rename = "Type", default)]
    pub media_type: String,
    /// Poster URL or "N/A"
    #[serde(rename = "Poster", default)]
    pub poster: String,
}

impl MovieSummary {
    /// Creates a summary with only id and title set.
    pub fn new(imdb_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: title.into(),
            year: String::new(),
            media_type: String::new(),
            poster: String::new(),
        }
    }

    /// Poster URL, if the backend has one.
    pub fn poster_url(&self) -> Option<&str> {
        Some(self.poster.as_str()).filter(|p| !p.is_empty() && *p != NOT_AVAILABLE)
    }
}

/// Third-party rating attached to a detail record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    /// Rating source, e.g. "Rotten Tomatoes"
    #[serde(rename = "Source")]
    pub source: String,
    /// Rating value as displayed by the source
    #[serde(rename = "Value")]
    pub value: String,
}

/// Full single-item record returned by a lookup by IMDb id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MovieDetail {
    /// IMDb identifier
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    /// Title of the media item
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Release year
    #[serde(rename = "Year", default)]
    pub year: String,
    /// Media type as reported by the backend
    #[serde(rename = "Type", default)]
    pub media_type: String,
    /// Poster URL or "N/A"
    #[serde(rename = "Poster", default)]
    pub poster: String,
    /// Content rating, e.g. "PG-13"
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    /// Release date
    #[serde(rename = "Released", default)]
    pub released: Option<String>,
    /// Runtime duration as string
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    /// Comma-separated genres
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    /// Director names
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    /// Writer names
    #[serde(rename = "Writer", default)]
    pub writer: Option<String>,
    /// Main cast
    #[serde(rename = "Actors", default)]
    pub actors: Option<String>,
    /// Plot summary
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    /// Spoken languages
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    /// Production countries
    #[serde(rename = "Country", default)]
    pub country: Option<String>,
    /// Awards summary
    #[serde(rename = "Awards", default)]
    pub awards: Option<String>,
    /// Ratings from other sources
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<Rating>,
    /// Metacritic score as string
    #[serde(rename = "Metascore", default)]
    pub metascore: Option<String>,
    /// IMDb rating as string
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    /// IMDb vote count as string
    #[serde(rename = "imdbVotes", default)]
    pub imdb_votes: Option<String>,
    /// DVD release date
    #[serde(rename = "DVD", default)]
    pub dvd: Option<String>,
    /// Box office takings
    #[serde(rename = "BoxOffice", default)]
    pub box_office: Option<String>,
    /// Production company
    #[serde(rename = "Production", default)]
    pub production: Option<String>,
    /// Official website
    #[serde(rename = "Website", default)]
    pub website: Option<String>,
}

impl MovieDetail {
    /// List-view projection of this record.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            media_type: self.media_type.clone(),
            poster: self.poster.clone(),
        }
    }

    /// IMDb rating as a number, if present.
    pub fn rating(&self) -> Option<f32> {
        self.imdb_rating
            .as_deref()
            .filter(|r| *r != NOT_AVAILABLE)
            .and_then(|r| r.parse().ok())
    }
}

/// Keyword query for the list search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchQuery {
    /// Title keywords
    pub title: String,
    /// Optional media type filter
    pub media_type: Option<MediaType>,
    /// Optional release year filter
    pub year: Option<String>,
    /// How many results the caller wants; caps the pages fetched
    pub desired_count: u32,
}

impl SearchQuery {
    /// Creates a movie query for `title` asking for one page of results.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets or clears the media type filter.
    pub fn with_media_type(mut self, media_type: Option<MediaType>) -> Self {
        self.media_type = media_type;
        self
    }

    /// Sets or clears the release year filter.
    pub fn with_year(mut self, year: Option<String>) -> Self {
        self.year = year.filter(|y| !y.is_empty());
        self
    }

    /// Sets the desired result count.
    pub fn with_desired_count(mut self, desired_count: u32) -> Self {
        self.desired_count = desired_count;
        self
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            title: String::new(),
            media_type: Some(MediaType::Movie),
            year: None,
            desired_count: 10,
        }
    }
}

/// One page of list search results as delivered by a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Results on this page, possibly empty
    pub results: Vec<MovieSummary>,
    /// Backend-reported total across all pages, as a textual integer
    pub total_results: String,
}

impl Page {
    /// Creates a page from results and the textual total.
    pub fn new(results: Vec<MovieSummary>, total_results: impl Into<String>) -> Self {
        Self {
            results,
            total_results: total_results.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_deserializes_omdb_fields() {
        let json = r#"{"Title":"Batman Begins","Year":"2005","imdbID":"tt0372784","Type":"movie","Poster":"N/A"}"#;
        let summary: MovieSummary = serde_json::from_str(json).unwrap();

        assert_eq!(summary.imdb_id, "tt0372784");
        assert_eq!(summary.title, "Batman Begins");
        assert_eq!(summary.media_type, "movie");
        assert_eq!(summary.poster_url(), None);
    }

    #[test]
    fn test_detail_ignores_unknown_fields() {
        let json = r#"{
            "Title":"Frozen II","Year":"2019","imdbID":"tt4520988","Type":"movie",
            "Poster":"https://example.com/p.jpg","imdbRating":"6.8",
            "Ratings":[{"Source":"Internet Movie Database","Value":"6.8/10"}],
            "Response":"True"
        }"#;
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        assert_eq!(detail.rating(), Some(6.8));
        assert_eq!(detail.ratings.len(), 1);
        assert_eq!(detail.summary().poster_url(), Some("https://example.com/p.jpg"));
        assert_eq!(detail.plot, None);
    }

    #[test]
    fn test_rating_not_available() {
        let detail = MovieDetail {
            imdb_rating: Some("N/A".to_string()),
            ..Default::default()
        };
        assert_eq!(detail.rating(), None);
    }

    #[test]
    fn test_media_type_parsing() {
        assert_eq!("Series".parse::<MediaType>(), Ok(MediaType::Series));
        assert!("game".parse::<MediaType>().is_err());
        assert_eq!(MediaType::Episode.to_string(), "episode");
    }

    #[test]
    fn test_query_defaults() {
        let query = SearchQuery::new("batman").with_year(Some(String::new()));

        assert_eq!(query.media_type, Some(MediaType::Movie));
        assert_eq!(query.year, None);
        assert_eq!(query.desired_count, 10);
    }
}
