//! Search view state and fetch orchestration
//!
//! [`SearchState`] decides whether a submitted query turns into a catalog
//! request and folds the outcome back in. A request is split in two halves,
//! [`SearchState::begin_fetch`] and [`SearchState::complete_fetch`], because
//! the front ends run it on a worker thread between the two.

use crate::catalog::BookCatalog;
use crate::error::SearchError;
use crate::search::empty::EmptyState;
use crate::search::item::ResultItem;
use tracing::{debug, info, warn};

/// Query submitted automatically when a view is mounted
pub const INITIAL_QUERY: &str = "React";

/// Request guard. At most one catalog request is in flight per view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchGuard {
    #[default]
    Idle,
    InFlight { query: String },
}

/// Why a submission did not produce a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Blank,
    AlreadyFetching,
    SameAsPrevious,
}

/// Which of the three result-area views to draw
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a> {
    Loading,
    Results(&'a [ResultItem]),
    Empty(EmptyState<'a>),
}

/// State owned by one search view
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Current text-input value, possibly not submitted yet
    pub query: String,
    previous_query: Option<String>,
    results: Vec<ResultItem>,
    guard: FetchGuard,
}

impl SearchState {
    /// Fresh state for a newly mounted view, with `initial_query` in the field
    pub fn new(initial_query: impl Into<String>) -> Self {
        Self {
            query: initial_query.into(),
            ..Default::default()
        }
    }

    pub fn previous_query(&self) -> Option<&str> {
        self.previous_query.as_deref()
    }

    pub fn results(&self) -> &[ResultItem] {
        &self.results
    }

    pub fn guard(&self) -> &FetchGuard {
        &self.guard
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.guard, FetchGuard::InFlight { .. })
    }

    /// Check the gate for `raw` without touching state.
    pub fn check(&self, raw: &str) -> Result<String, Rejection> {
        let query = raw.trim();
        if query.is_empty() {
            return Err(Rejection::Blank);
        }
        if self.is_fetching() {
            return Err(Rejection::AlreadyFetching);
        }
        if self.previous_query.as_deref() == Some(query) {
            return Err(Rejection::SameAsPrevious);
        }
        Ok(query.to_string())
    }

    /// Start a request for `raw` if the gate allows it.
    ///
    /// Returns the trimmed query to send, or `None` when the submission is
    /// dropped. A dropped submission leaves the state untouched.
    pub fn begin_fetch(&mut self, raw: &str) -> Option<String> {
        match self.check(raw) {
            Ok(query) => {
                info!(%query, "search dispatched");
                self.guard = FetchGuard::InFlight {
                    query: query.clone(),
                };
                Some(query)
            }
            Err(reason) => {
                debug!(raw, ?reason, "submission dropped");
                None
            }
        }
    }

    /// Fold the outcome of the in-flight request back in.
    ///
    /// Success and failure both record the query as searched. A failure is
    /// logged and shows up as an empty result set. Does nothing if no
    /// request is in flight.
    pub fn complete_fetch(&mut self, outcome: Result<Vec<ResultItem>, SearchError>) {
        let query = match std::mem::take(&mut self.guard) {
            FetchGuard::InFlight { query } => query,
            FetchGuard::Idle => {
                debug!("completion without a request in flight, ignored");
                return;
            }
        };

        let results = match outcome {
            Ok(items) => {
                info!(%query, count = items.len(), "search completed");
                items
            }
            Err(e) => {
                warn!(%query, error = %e, "failed to fetch books");
                Vec::new()
            }
        };

        self.results = results;
        self.previous_query = Some(query);
    }

    /// Run a whole request synchronously against `catalog`.
    ///
    /// Returns whether a request was issued. Never fails: catalog errors
    /// are recovered the same way [`complete_fetch`](Self::complete_fetch)
    /// recovers them.
    pub fn submit_with<C: BookCatalog + ?Sized>(&mut self, raw: &str, catalog: &C) -> bool {
        match self.begin_fetch(raw) {
            Some(query) => {
                let outcome = catalog.search(&query);
                self.complete_fetch(outcome);
                true
            }
            None => false,
        }
    }

    /// Submit whatever is in the text field
    pub fn begin_form_submit(&mut self) -> Option<String> {
        let raw = self.query.clone();
        self.begin_fetch(&raw)
    }

    /// Select the view for the result area
    pub fn view(&self) -> View<'_> {
        if self.is_fetching() {
            View::Loading
        } else if !self.results.is_empty() {
            View::Results(&self.results)
        } else {
            View::Empty(EmptyState::new(self.previous_query.as_deref()))
        }
    }
}
