//! Error types for booksearch
//!
//! A search has exactly one failure kind. Everything else belongs to the
//! application shell (terminal, window, configuration).

use thiserror::Error;

/// Failure of a catalog search.
///
/// Network errors, HTTP error statuses and unparseable bodies are not
/// told apart: the view treats them all like an empty result set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    RequestFailed(String),
}

impl SearchError {
    pub fn request_failed(context: impl std::fmt::Display) -> Self {
        SearchError::RequestFailed(context.to_string())
    }
}

/// Main error type for the application shell
#[derive(Error, Debug)]
pub enum BookSearchError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("GUI error: {0}")]
    Gui(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Result type alias for booksearch operations
pub type Result<T> = std::result::Result<T, BookSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_display() {
        let err = SearchError::request_failed("connection refused");
        assert_eq!(err.to_string(), "search request failed: connection refused");
    }

    #[test]
    fn search_error_is_transparent_in_shell_error() {
        let err: BookSearchError = SearchError::request_failed("HTTP 503").into();
        assert_eq!(err.to_string(), "search request failed: HTTP 503");
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
        assert_send_sync::<BookSearchError>();
    }
}
