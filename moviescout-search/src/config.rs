//! Configuration for MovieScout search providers.
//!
//! Defaults target the public OMDb endpoint; environment variables override
//! them at startup.

use std::time::Duration;

/// Public OMDb endpoint.
pub const DEFAULT_OMDB_ENDPOINT: &str = "https://www.omdbapi.com/";

/// Settings for the HTTP provider and provider selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Base URL requests are sent to
    pub endpoint: String,
    /// OMDb API key, sent as `apikey`
    pub api_key: Option<String>,
    /// Whole-request timeout enforced by the HTTP client
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: String,
    /// Use the offline demo catalogue instead of the network
    pub use_demo_data: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OMDB_ENDPOINT.to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("moviescout/", env!("CARGO_PKG_VERSION")).to_string(),
            use_demo_data: false,
        }
    }
}

impl SearchConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Reads `OMDB_API_KEY`, `MOVIESCOUT_OMDB_ENDPOINT`,
    /// `MOVIESCOUT_REQUEST_TIMEOUT` (seconds) and `MOVIESCOUT_USE_DEMO_DATA`.
    /// Unparseable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(api_key) = lookup("OMDB_API_KEY").filter(|k| !k.is_empty()) {
            config.api_key = Some(api_key);
        }

        if let Some(endpoint) = lookup("MOVIESCOUT_OMDB_ENDPOINT").filter(|e| !e.is_empty()) {
            config.endpoint = endpoint;
        }

        if let Some(timeout) = lookup("MOVIESCOUT_REQUEST_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Some(demo) = lookup("MOVIESCOUT_USE_DEMO_DATA") {
            config.use_demo_data = demo.parse().unwrap_or(false);
        }

        config
    }

    /// Configuration pointing at a custom endpoint, used by tests and proxies.
    pub fn with_endpoint(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_values() {
        let config = SearchConfig::default();

        assert_eq!(config.endpoint, DEFAULT_OMDB_ENDPOINT);
        assert_eq!(config.api_key, None);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("moviescout/"));
        assert!(!config.use_demo_data);
    }

    #[test]
    fn test_env_overrides() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            ("OMDB_API_KEY", "7035c60c"),
            ("MOVIESCOUT_OMDB_ENDPOINT", "http://127.0.0.1:9000/"),
            ("MOVIESCOUT_REQUEST_TIMEOUT", "5"),
            ("MOVIESCOUT_USE_DEMO_DATA", "true"),
        ]));

        assert_eq!(config.api_key.as_deref(), Some("7035c60c"));
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.use_demo_data);
    }

    #[test]
    fn test_invalid_env_values_keep_defaults() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            ("OMDB_API_KEY", ""),
            ("MOVIESCOUT_REQUEST_TIMEOUT", "soon"),
            ("MOVIESCOUT_USE_DEMO_DATA", "yes"),
        ]));

        assert_eq!(config, SearchConfig::default());
    }
}
