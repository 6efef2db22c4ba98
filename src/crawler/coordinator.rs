//! Crawler coordinator - concurrent exploration of the URL graph
//!
//! Each newly reserved URL gets its own tokio task. A task fetches its page,
//! marks it fetched, reserves the outbound links it is first to see, spawns a
//! child task per reservation and then joins all of its children. The root
//! join is what [`Crawler::run`] waits on, so a run only returns once the
//! whole task tree is done.

use crate::config::CrawlerConfig;
use crate::crawler::Fetcher;
use crate::output::{CrawlReport, FetchFailure};
use crate::state::VisitedSet;
use crate::CrawlError;
use chrono::Utc;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

/// Concurrent crawler over a pluggable [`Fetcher`]
#[derive(Clone)]
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    max_concurrent_fetches: Option<usize>,
}

/// State shared by every exploration task of one run
struct CrawlContext {
    fetcher: Arc<dyn Fetcher>,
    visited: VisitedSet,
    gate: Option<Semaphore>,
}

/// What one exploration task and all of its descendants produced
#[derive(Debug, Default)]
struct Subtree {
    fetched: usize,
    failures: Vec<FetchFailure>,
    panics: Vec<String>,
}

impl Subtree {
    fn merge(&mut self, child: Subtree) {
        self.fetched += child.fetched;
        self.failures.extend(child.failures);
        self.panics.extend(child.panics);
    }
}

type Exploration = Pin<Box<dyn Future<Output = Subtree> + Send>>;

impl Crawler {
    /// Creates a crawler with no bound on in-flight fetches
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            max_concurrent_fetches: None,
        }
    }

    /// Creates a crawler using the `[crawler]` section of a config file
    pub fn with_config(fetcher: Arc<dyn Fetcher>, config: &CrawlerConfig) -> Self {
        Self::new(fetcher).with_concurrency_limit(config.max_concurrent_fetches)
    }

    /// Bounds how many `fetch` calls may be in flight at once; `0` means unbounded
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = (limit > 0).then_some(limit.min(Semaphore::MAX_PERMITS));
        self
    }

    /// Crawls from `seed`, following links at most `max_depth` pages deep
    ///
    /// A depth of 1 fetches only the seed. Blocks until every spawned
    /// exploration task has finished. Fetch errors never abort the run;
    /// they are logged and listed in [`CrawlReport::failures`].
    ///
    /// # Errors
    ///
    /// * [`CrawlError::InvalidSeed`] - the seed is empty
    /// * [`CrawlError::TaskPanicked`] - an exploration task panicked (the
    ///   remaining tasks are still joined first)
    pub async fn run(&self, seed: &str, max_depth: u32) -> Result<CrawlReport, CrawlError> {
        if seed.trim().is_empty() {
            return Err(CrawlError::InvalidSeed(seed.to_string()));
        }

        let started_at = Utc::now();
        let start_time = Instant::now();
        tracing::info!("Starting crawl from {} (max depth {})", seed, max_depth);

        let context = Arc::new(CrawlContext {
            fetcher: Arc::clone(&self.fetcher),
            visited: VisitedSet::new(),
            gate: self.max_concurrent_fetches.map(Semaphore::new),
        });

        context.visited.try_reserve(seed);
        let root = tokio::spawn(explore(
            Arc::clone(&context),
            seed.to_string(),
            max_depth,
        ));
        let mut subtree = root
            .await
            .map_err(|e| CrawlError::TaskPanicked(panic_message(e)))?;

        if let Some(message) = subtree.panics.into_iter().next() {
            tracing::error!("Crawl aborted: {}", message);
            return Err(CrawlError::TaskPanicked(message));
        }

        subtree.failures.sort_by(|a, b| a.url.cmp(&b.url));

        let report = CrawlReport {
            seed: seed.to_string(),
            max_depth,
            fetched: subtree.fetched,
            discovered: context.visited.len(),
            fetched_urls: context.visited.fetched_urls(),
            failures: subtree.failures,
            started_at,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Crawl completed: {} pages fetched, {} failed, {} discovered in {:?}",
            report.fetched,
            report.failures.len(),
            report.discovered,
            report.elapsed
        );

        Ok(report)
    }
}

/// Crawls from `seed` and returns the number of pages fetched
///
/// # Example
///
/// ```
/// use ripple_crawl::{crawl, FixtureFetcher};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), ripple_crawl::CrawlError> {
/// let fetcher = FixtureFetcher::new()
///     .with_page("A", "page A", &["B"])
///     .with_page("B", "page B", &["A"]);
/// assert_eq!(crawl("A", 3, Arc::new(fetcher)).await?, 2);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    seed: &str,
    max_depth: u32,
    fetcher: Arc<dyn Fetcher>,
) -> Result<usize, CrawlError> {
    let report = Crawler::new(fetcher).run(seed, max_depth).await?;
    Ok(report.fetched)
}

/// Explores `url`, which the caller has already reserved
fn explore(context: Arc<CrawlContext>, url: String, remaining: u32) -> Exploration {
    Box::pin(async move {
        let mut subtree = Subtree::default();

        if remaining == 0 {
            tracing::trace!("Depth budget exhausted at {}", url);
            return subtree;
        }

        let fetched = {
            // Only the fetch itself is gated; children are joined without a permit
            let _permit = match &context.gate {
                Some(gate) => gate.acquire().await.ok(),
                None => None,
            };
            context.fetcher.fetch(&url).await
        };

        let page = match fetched {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!("{}", error);
                subtree.failures.push(FetchFailure { url, error });
                return subtree;
            }
        };

        context.visited.mark_fetched(&url);
        subtree.fetched = 1;
        tracing::info!("found: {} {:?}", url, page.body);

        let mut children = JoinSet::new();
        for link in page.links {
            if context.visited.try_reserve(&link) {
                tracing::debug!("Reserved {} (remaining depth {})", link, remaining - 1);
                children.spawn(explore(Arc::clone(&context), link, remaining - 1));
            }
        }

        while let Some(joined) = children.join_next().await {
            match joined {
                Ok(child) => subtree.merge(child),
                Err(e) => {
                    let message = panic_message(e);
                    tracing::error!("Exploration task under {} failed: {}", url, message);
                    subtree.panics.push(message);
                }
            }
        }

        subtree
    })
}

fn panic_message(error: JoinError) -> String {
    if !error.is_panic() {
        return error.to_string();
    }
    let payload = error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
