//! Output module for crawl reports
//!
//! This module handles:
//! - The summary a crawl run produces
//! - Printing that summary for the command line

pub mod report;

pub use report::{print_report, CrawlReport, FetchFailure};
