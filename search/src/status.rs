//! Search status.

use std::fmt;

/// Terminal status of a search.
///
/// A running search is internally in progress; `find_solution` only ever
/// returns one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// A goal state was reached; the outcome carries a plan.
    Solved,
    /// The frontier emptied with nothing cut by a bound: no plan exists.
    Exhausted,
    /// A configured bound stopped the search before it could decide.
    OutOfResources,
}

impl SearchStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solved => "solved",
            Self::Exhausted => "exhausted",
            Self::OutOfResources => "out_of_resources",
        }
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
