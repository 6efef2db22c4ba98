//! Crawl report generation
//!
//! This module provides the summary returned by a crawl run and the
//! functionality for displaying it.

use crate::FetchError;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// A URL whose fetch failed, with the error the fetcher returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    pub error: FetchError,
}

/// Summary of a completed crawl run
///
/// Built only after every exploration task has been joined, so the counts
/// describe a quiesced run.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// URL the crawl started from
    pub seed: String,

    /// Depth bound the crawl ran with
    pub max_depth: u32,

    /// Number of pages fetched successfully
    pub fetched: usize,

    /// Number of URLs reserved, fetched or not
    pub discovered: usize,

    /// Fetched URLs, sorted
    pub fetched_urls: Vec<String>,

    /// Failed fetches, sorted by URL
    pub failures: Vec<FetchFailure>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Fraction of attempted fetches that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempted = self.fetched + self.failures.len();
        if attempted > 0 {
            (self.fetched as f64 / attempted as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Prints a crawl report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
/// * `list_pages` - Whether to list every fetched URL
pub fn print_report(report: &CrawlReport, list_pages: bool) {
    println!("=== Crawl Report ===\n");

    println!("Overview:");
    println!("  Seed: {}", report.seed);
    println!("  Max depth: {}", report.max_depth);
    println!("  Started at: {}", report.started_at.to_rfc3339());
    println!("  Duration: {:?}", report.elapsed);
    println!();

    println!("Pages:");
    println!("  Fetched: {}", report.fetched);
    println!("  Failed: {}", report.failures.len());
    println!(
        "  Discovered but not fetched: {}",
        report
            .discovered
            .saturating_sub(report.fetched + report.failures.len())
    );
    println!();

    if list_pages && !report.fetched_urls.is_empty() {
        println!("Fetched URLs ({}):", report.fetched_urls.len());
        for url in &report.fetched_urls {
            println!("  - {}", url);
        }
        println!();
    }

    if !report.failures.is_empty() {
        println!("Failures ({}):", report.failures.len());
        for failure in &report.failures {
            println!("  - {}", failure.error);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} fetches succeeded)",
        report.success_rate(),
        report.fetched,
        report.fetched + report.failures.len()
    );
}
