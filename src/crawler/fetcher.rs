//! Fetcher capability
//!
//! The crawler never fetches anything itself. It asks a [`Fetcher`] for the
//! body and outbound links of a URL, and the implementation decides where
//! those come from (a canned fixture, a recorded site, a real client).

use crate::FetchError;
use async_trait::async_trait;

/// Result of a successful fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page body content
    pub body: String,

    /// Outbound URLs in page order (duplicates and self-links allowed)
    pub links: Vec<String>,
}

impl Page {
    /// Creates a page from a body and its outbound links
    pub fn new(body: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            body: body.into(),
            links,
        }
    }
}

/// Source of page content for the crawler
///
/// Implementations are called from many exploration tasks at once and must
/// be safe to share across threads.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, returning its body and outbound links
    async fn fetch(&self, url: &str) -> Result<Page, FetchError>;
}
