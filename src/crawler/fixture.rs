//! Canned-results fetcher
//!
//! `FixtureFetcher` serves pages from an in-memory table built up front. It
//! is an ordinary value passed to the crawler, so tests and demos each own
//! their own graph.

use crate::config::PageEntry;
use crate::crawler::{Fetcher, Page};
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Fetcher that returns canned results
#[derive(Debug, Clone, Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, Page>,
}

impl FixtureFetcher {
    /// Creates an empty fixture; every fetch returns `NotFound`
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page and returns the fixture, for chained construction
    ///
    /// # Example
    ///
    /// ```
    /// use ripple_crawl::FixtureFetcher;
    ///
    /// let fetcher = FixtureFetcher::new()
    ///     .with_page("A", "page A", &["B", "C"])
    ///     .with_page("B", "page B", &["A"]);
    /// assert_eq!(fetcher.len(), 2);
    /// ```
    pub fn with_page(mut self, url: &str, body: &str, links: &[&str]) -> Self {
        self.insert(
            url,
            Page::new(body, links.iter().map(|link| link.to_string()).collect()),
        );
        self
    }

    /// Adds or replaces the page served for `url`
    pub fn insert(&mut self, url: impl Into<String>, page: Page) {
        self.pages.insert(url.into(), page);
    }

    /// Builds a fixture from `[[page]]` entries of a config file
    pub fn from_entries(entries: &[PageEntry]) -> Self {
        entries
            .iter()
            .map(|entry| {
                (
                    entry.url.clone(),
                    Page::new(entry.body.clone(), entry.links.clone()),
                )
            })
            .collect()
    }

    /// The small Go-tour site: four pages, with `/cmd/` linked but missing
    pub fn golang_tour() -> Self {
        Self::new()
            .with_page(
                "https://golang.org/",
                "The Go Programming Language",
                &["https://golang.org/pkg/", "https://golang.org/cmd/"],
            )
            .with_page(
                "https://golang.org/pkg/",
                "Packages",
                &[
                    "https://golang.org/",
                    "https://golang.org/cmd/",
                    "https://golang.org/pkg/fmt/",
                    "https://golang.org/pkg/os/",
                ],
            )
            .with_page(
                "https://golang.org/pkg/fmt/",
                "Package fmt",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
            .with_page(
                "https://golang.org/pkg/os/",
                "Package os",
                &["https://golang.org/", "https://golang.org/pkg/"],
            )
    }

    /// Number of pages in the fixture
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl FromIterator<(String, Page)> for FixtureFetcher {
    fn from_iter<I: IntoIterator<Item = (String, Page)>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}
