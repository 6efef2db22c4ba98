//! Ripple-Crawl: a concurrent crawler over a shared visited-URL set
//!
//! This crate explores a URL graph from a single seed, fetching each page
//! through a pluggable [`crawler::Fetcher`], following links up to a depth
//! bound and fetching every URL at most once.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Ripple-Crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL: {0:?}")]
    InvalidSeed(String),

    #[error("Exploration task panicked: {0}")]
    TaskPanicked(String),
}

/// Error reported by a [`crawler::Fetcher`] for a single URL
///
/// Fetch errors are local to one URL: the crawler logs them, records them in
/// the report and keeps exploring the rest of the graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("fetch failed for {url}: {message}")]
    Failed { url: String, message: String },
}

impl FetchError {
    /// Returns the URL this error refers to
    pub fn url(&self) -> &str {
        match self {
            Self::NotFound { url } | Self::Failed { url, .. } => url,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Ripple-Crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlReport, Crawler, FetchFailure, Fetcher, FixtureFetcher, Page};
pub use state::{PageState, VisitedSet};
