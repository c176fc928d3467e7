//! Error types for movie search functionality.

use thiserror::Error;

/// Errors that can occur while talking to a movie search backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MovieSearchError {
    /// Backend answered but reported an error in its response body.
    #[error("Application error: {reason}")]
    Application {
        /// Human-readable text supplied by the backend
        reason: String,
    },

    /// Network communication failed or the backend returned a failure status.
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network error
        reason: String,
    },

    /// Failed to decode the response body.
    #[error("Parse error: {reason}")]
    Parse {
        /// The reason for the parse error
        reason: String,
    },

    /// Provider could not be configured from the given settings.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// The reason for the configuration error
        reason: String,
    },
}

impl MovieSearchError {
    /// Returns the plain failure text, without the error kind prefix.
    ///
    /// This is the text committed to the session message after a failed
    /// list search.
    pub fn user_message(&self) -> &str {
        match self {
            MovieSearchError::Application { reason }
            | MovieSearchError::Network { reason }
            | MovieSearchError::Parse { reason }
            | MovieSearchError::Configuration { reason } => reason,
        }
    }

    /// Checks if the backend itself rejected the request.
    pub fn is_application_error(&self) -> bool {
        matches!(self, MovieSearchError::Application { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_strips_kind_prefix() {
        let error = MovieSearchError::Network {
            reason: "timeout".to_string(),
        };
        assert_eq!(error.to_string(), "Network error: timeout");
        assert_eq!(error.user_message(), "timeout");
    }

    #[test]
    fn test_application_error_detection() {
        let error = MovieSearchError::Application {
            reason: "Movie not found!".to_string(),
        };
        assert!(error.is_application_error());
        assert!(
            !MovieSearchError::Parse {
                reason: "bad json".to_string()
            }
            .is_application_error()
        );
    }
}
