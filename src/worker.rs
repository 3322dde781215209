//! Background catalog requests
//!
//! Each dispatched query runs on its own thread and reports back over a
//! channel; the UI loop drains the channel every tick. The search state's
//! guard keeps this to one thread at a time.

use crate::catalog::BookCatalog;
use crate::error::SearchError;
use crate::search::{ResultItem, SearchState};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Result of one dispatched query
#[derive(Debug)]
pub struct FetchOutcome {
    pub query: String,
    pub result: Result<Vec<ResultItem>, SearchError>,
}

pub struct FetchWorker {
    catalog: Arc<dyn BookCatalog>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl FetchWorker {
    pub fn new(catalog: Arc<dyn BookCatalog>) -> Self {
        let (tx, rx) = unbounded();
        Self { catalog, tx, rx }
    }

    /// Run `query` against the catalog on a background thread.
    pub fn dispatch(&self, query: String) {
        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        let job_query = query.clone();

        let spawned = thread::Builder::new()
            .name("booksearch-fetch".to_string())
            .spawn(move || {
                let result = catalog.search(&job_query);
                // Receiver is gone once the view is closed
                let _ = tx.send(FetchOutcome {
                    query: job_query,
                    result,
                });
            });

        if let Err(e) = spawned {
            let _ = self.tx.send(FetchOutcome {
                query,
                result: Err(SearchError::request_failed(format!(
                    "could not start request thread: {}",
                    e
                ))),
            });
        }
    }

    pub fn try_recv(&self) -> Option<FetchOutcome> {
        self.rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Apply every finished request to `state`. Returns whether anything arrived.
    pub fn drain_into(&self, state: &mut SearchState) -> bool {
        let mut changed = false;
        while let Some(outcome) = self.try_recv() {
            if let crate::search::FetchGuard::InFlight { query } = state.guard() {
                if *query != outcome.query {
                    tracing::warn!(
                        expected = %query,
                        got = %outcome.query,
                        "outcome for a different query"
                    );
                }
            }
            state.complete_fetch(outcome.result);
            changed = true;
        }
        changed
    }
}
