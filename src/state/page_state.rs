/// Page state definitions for tracking crawl progress
///
/// A URL only ever moves forward: `Discovered` then `Fetched`.
use std::fmt;

/// Represents the current state of a URL during a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// URL has been reserved by an exploration task but not fetched yet
    Discovered,

    /// URL was fetched successfully
    Fetched,
}

impl PageState {
    /// Returns true if this is a terminal state (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Fetched)
    }

    /// Converts the page state to its string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Fetched => "fetched",
        }
    }

    /// Parses a page state from its string representation
    ///
    /// Returns None if the string doesn't match any known state.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "discovered" => Some(Self::Discovered),
            "fetched" => Some(Self::Fetched),
            _ => None,
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
