//! Front-end independent search view logic

pub mod bounce;
pub mod empty;
pub mod item;
pub mod state;

pub use bounce::BounceLatch;
pub use empty::{EmptyState, EmptyStateEffects};
pub use item::{PreviewCard, ResultItem};
pub use state::{FetchGuard, Rejection, SearchState, View, INITIAL_QUERY};

pub const HEADING: &str = "Book Search";
pub const INPUT_LABEL: &str = "Search by author, title, and/or keywords:";
pub const LOADING_TEXT: &str = "Loading...\u{231B}";
