//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: the state of an individual URL (discovered, fetched)
//! - `VisitedSet`: the shared, thread-safe set of URLs claimed during a run

mod page_state;
mod visited;

// Re-export main types
pub use page_state::PageState;
pub use visited::VisitedSet;
