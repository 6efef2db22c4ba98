//! Integration tests for the crawler
//!
//! These tests use canned fixture graphs and a recording fetcher to check
//! the full crawl cycle end-to-end: deduplication, the depth bound,
//! termination on cyclic graphs and isolation of fetch errors.

use async_trait::async_trait;
use ripple_crawl::config::load_config;
use ripple_crawl::{crawl, Crawler, FetchError, Fetcher, FixtureFetcher, Page};
use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Wraps a fixture and fails the test if any URL is fetched twice
struct RecordingFetcher {
    inner: FixtureFetcher,
    calls: Mutex<HashMap<String, usize>>,
    delay: Duration,
}

impl RecordingFetcher {
    fn new(inner: FixtureFetcher) -> Self {
        Self {
            inner,
            calls: Mutex::new(HashMap::new()),
            delay: Duration::ZERO,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn fetched(&self) -> BTreeSet<String> {
        self.calls.lock().unwrap().keys().cloned().collect()
    }

    fn calls_for(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Fetcher for RecordingFetcher {
    async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        {
            let mut calls = self.calls.lock().unwrap();
            let count = calls.entry(url.to_string()).or_insert(0);
            *count += 1;
            assert_eq!(*count, 1, "{} fetched more than once", url);
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.fetch(url).await
    }
}

fn abcd_graph() -> FixtureFetcher {
    FixtureFetcher::new()
        .with_page("A", "page A", &["B", "C"])
        .with_page("B", "page B", &["A", "D"])
        .with_page("C", "page C", &[])
        .with_page("D", "page D", &[])
}

fn set(urls: &[&str]) -> BTreeSet<String> {
    urls.iter().map(|u| u.to_string()).collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_abcd_graph_depth_three() {
    let fetcher = Arc::new(RecordingFetcher::new(abcd_graph()));
    let report = Crawler::new(fetcher.clone()).run("A", 3).await.unwrap();

    assert_eq!(report.fetched, 4);
    assert_eq!(fetcher.fetched(), set(&["A", "B", "C", "D"]));
    for url in ["A", "B", "C", "D"] {
        assert_eq!(fetcher.calls_for(url), 1);
    }
    assert_eq!(report.fetched_urls, vec!["A", "B", "C", "D"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_abcd_graph_depth_one_fetches_only_seed() {
    let fetcher = Arc::new(RecordingFetcher::new(abcd_graph()));
    let report = Crawler::new(fetcher.clone()).run("A", 1).await.unwrap();

    assert_eq!(report.fetched, 1);
    assert_eq!(fetcher.fetched(), set(&["A"]));
    // B and C were discovered but never fetched
    assert_eq!(report.discovered, 3);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_crawl_returns_fetched_count() {
    let count = crawl("A", 3, Arc::new(abcd_graph())).await.unwrap();
    assert_eq!(count, 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_depth_bound_respected_on_chain() {
    let chain = FixtureFetcher::new()
        .with_page("1", "one", &["2"])
        .with_page("2", "two", &["3"])
        .with_page("3", "three", &["4"])
        .with_page("4", "four", &[]);
    let fetcher = Arc::new(RecordingFetcher::new(chain));

    let report = Crawler::new(fetcher.clone()).run("1", 2).await.unwrap();

    assert_eq!(report.fetched, 2);
    assert_eq!(fetcher.fetched(), set(&["1", "2"]));
    assert_eq!(fetcher.calls_for("3"), 0);
    assert_eq!(fetcher.calls_for("4"), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_terminates_on_cycles_and_self_links() {
    let cyclic = FixtureFetcher::new()
        .with_page("A", "a", &["A", "B", "B"])
        .with_page("B", "b", &["A", "B"]);
    let fetcher = Arc::new(RecordingFetcher::new(cyclic));

    let report = tokio::time::timeout(
        Duration::from_secs(5),
        Crawler::new(fetcher.clone()).run("A", 100),
    )
    .await
    .expect("crawl did not terminate")
    .unwrap();

    assert_eq!(report.fetched, 2);
    assert_eq!(fetcher.fetched(), set(&["A", "B"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_no_duplicate_fetch_on_dense_graph() {
    // Every page links to every other page, so each URL is found by many
    // tasks at the same time
    let urls: Vec<String> = (0..40).map(|i| format!("https://dense.test/{}", i)).collect();
    let links: Vec<&str> = urls.iter().map(String::as_str).collect();
    let mut dense = FixtureFetcher::new();
    for url in &urls {
        dense.insert(
            url.clone(),
            Page::new(url.clone(), links.iter().map(|l| l.to_string()).collect()),
        );
    }
    let fetcher = Arc::new(RecordingFetcher::new(dense).with_delay(Duration::from_millis(1)));

    let report = Crawler::new(fetcher.clone())
        .run("https://dense.test/0", 5)
        .await
        .unwrap();

    assert_eq!(report.fetched, 40);
    assert_eq!(report.discovered, 40);
    for url in &urls {
        assert_eq!(fetcher.calls_for(url), 1, "{} not fetched exactly once", url);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fetch_error_is_isolated() {
    let graph = FixtureFetcher::new()
        .with_page("root", "root", &["broken", "left", "right"])
        .with_page("left", "left", &["left-child"])
        .with_page("right", "right", &[])
        .with_page("left-child", "left child", &[]);
    let fetcher = Arc::new(RecordingFetcher::new(graph));

    let report = Crawler::new(fetcher.clone()).run("root", 3).await.unwrap();

    assert_eq!(report.fetched, 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, "broken");
    assert_eq!(
        report.failures[0].error,
        FetchError::NotFound {
            url: "broken".to_string()
        }
    );
    assert!(report.fetched_urls.contains(&"left-child".to_string()));
}

#[tokio::test]
async fn test_seed_fetch_error_returns_empty_report() {
    let fetcher = Arc::new(FixtureFetcher::new());
    let report = Crawler::new(fetcher).run("nowhere", 3).await.unwrap();

    assert_eq!(report.fetched, 0);
    assert_eq!(report.failures.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_golang_tour_site() {
    let fetcher = Arc::new(RecordingFetcher::new(FixtureFetcher::golang_tour()));
    let report = Crawler::new(fetcher.clone())
        .run("https://golang.org/", 4)
        .await
        .unwrap();

    assert_eq!(report.fetched, 4);
    assert_eq!(
        report.fetched_urls,
        vec![
            "https://golang.org/",
            "https://golang.org/pkg/",
            "https://golang.org/pkg/fmt/",
            "https://golang.org/pkg/os/",
        ]
    );
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, "https://golang.org/cmd/");
    assert_eq!(fetcher.calls_for("https://golang.org/cmd/"), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawl_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[crawler]
seed = "https://example.com/"
max-depth = 3
max-concurrent-fetches = 2

[[page]]
url = "https://example.com/"
body = "Home"
links = ["https://example.com/a", "https://example.com/b"]

[[page]]
url = "https://example.com/a"
body = "A"
links = ["https://example.com/", "https://example.com/b"]

[[page]]
url = "https://example.com/b"
body = "B"
"#,
    )
    .unwrap();
    file.flush().unwrap();

    let config = load_config(file.path()).unwrap();
    let fetcher = Arc::new(FixtureFetcher::from_entries(&config.pages));
    let report = Crawler::with_config(fetcher, &config.crawler)
        .run(&config.crawler.seed, config.crawler.max_depth)
        .await
        .unwrap();

    assert_eq!(report.fetched, 3);
    assert!(report.failures.is_empty());
}
