//! booksearch - search the Google Books catalog
//!
//! A text field submits a query to the catalog and the hits are shown as
//! preview cards (title, authors, thumbnail, link). The same view logic
//! drives a terminal front end and a native window.
//!
//! # Features
//!
//! - **One request at a time**: submissions while a request is in flight are dropped
//! - **No repeated requests**: submitting the last completed query again does nothing
//! - **Three-way result area**: loading, result list, or empty state
//! - **Bounce affordance**: the empty state's call to action bounces the input once
//!
//! # Example
//!
//! ```no_run
//! use booksearch::{AppConfig, GoogleBooksClient, SearchState, View};
//!
//! let client = GoogleBooksClient::new(&AppConfig::default());
//! let mut state = SearchState::new("React");
//! state.submit_with("React", &client);
//!
//! match state.view() {
//!     View::Results(items) => {
//!         for item in items {
//!             println!("{}", item.title.as_deref().unwrap_or("(untitled)"));
//!         }
//!     }
//!     View::Empty(empty) => println!("{}", empty.message()),
//!     View::Loading => unreachable!(),
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod gui;
pub mod logging;
pub mod search;
pub mod tui;
pub mod worker;

use std::time::Duration;

// Re-export main types
pub use catalog::{BookCatalog, GoogleBooksClient, DEFAULT_ENDPOINT};
pub use error::{BookSearchError, Result, SearchError};
pub use search::{
    BounceLatch, EmptyState, EmptyStateEffects, FetchGuard, PreviewCard, ResultItem,
    SearchState, View, INITIAL_QUERY,
};
pub use worker::{FetchOutcome, FetchWorker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Catalog search endpoint
    pub endpoint: String,
    /// Results requested per search
    pub max_results: usize,
    /// Language restriction sent with every search
    pub language: String,
    /// Query submitted when a view opens
    pub initial_query: String,
    /// Overall request timeout; `None` waits for as long as the server takes
    pub request_timeout: Option<Duration>,
    /// User-Agent header for catalog requests
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_results: 16,
            language: "en".to_string(),
            initial_query: INITIAL_QUERY.to_string(),
            request_timeout: None,
            user_agent: format!("booksearch/{}", VERSION),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(BookSearchError::Config("endpoint must not be empty".into()));
        }
        if self.max_results == 0 {
            return Err(BookSearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.initial_query.trim().is_empty() {
            return Err(BookSearchError::Config(
                "initial query must not be blank".into(),
            ));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(BookSearchError::Config(
                "request timeout must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_catalog_contract() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint, "https://www.googleapis.com/books/v1/volumes");
        assert_eq!(config.max_results, 16);
        assert_eq!(config.language, "en");
        assert_eq!(config.initial_query, "React");
        assert!(config.request_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_initial_query_rejected() {
        let config = AppConfig {
            initial_query: "  ".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("initial query"));
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = AppConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = AppConfig {
            request_timeout: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
