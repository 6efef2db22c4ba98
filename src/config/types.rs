use serde::Deserialize;

/// Main configuration structure for Ripple-Crawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,

    /// Canned pages served by the fixture fetcher
    #[serde(default, rename = "page")]
    pub pages: Vec<PageEntry>,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL to start crawling from
    pub seed: String,

    /// Maximum depth to crawl from the seed (1 = only the seed)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of fetches in flight at once (0 = unbounded)
    #[serde(rename = "max-concurrent-fetches", default)]
    pub max_concurrent_fetches: usize,
}

/// A canned page: its URL, body and outbound links
#[derive(Debug, Clone, Deserialize)]
pub struct PageEntry {
    pub url: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub links: Vec<String>,
}
