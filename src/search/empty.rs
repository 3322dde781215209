//! Empty state: shown whenever there are no results to list

use crate::search::bounce::BounceLatch;

pub const NOTHING_YET_MESSAGE: &str = "Nothing to see here yet. \u{1F47B}\u{1F440}";
pub const FIRST_SEARCH_LABEL: &str = "Let's find a book! \u{1F50D}";
pub const SEARCH_AGAIN_LABEL: &str = "Search again?";

/// Covers both "never searched" and "search returned nothing"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState<'a> {
    previous_query: Option<&'a str>,
}

/// What the front end has to do after the call to action was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyStateEffects {
    /// Move input focus to the search field
    pub focus_input: bool,
    /// Empty the text field. Local only; no request follows.
    pub clear_query: bool,
    /// Start the bounce animation on the input container
    pub start_bounce: bool,
}

impl<'a> EmptyState<'a> {
    pub fn new(previous_query: Option<&'a str>) -> Self {
        Self { previous_query }
    }

    pub fn previous_query(&self) -> Option<&'a str> {
        self.previous_query
    }

    pub fn message(&self) -> String {
        match self.previous_query {
            Some(query) => format!("No Books Found for \"{}\"", query),
            None => NOTHING_YET_MESSAGE.to_string(),
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.previous_query.is_some() {
            SEARCH_AGAIN_LABEL
        } else {
            FIRST_SEARCH_LABEL
        }
    }

    /// The call to action was clicked.
    pub fn activate(&self, bounce: &mut BounceLatch) -> EmptyStateEffects {
        EmptyStateEffects {
            focus_input: true,
            clear_query: self.previous_query.is_some(),
            start_bounce: bounce.trigger(),
        }
    }
}
