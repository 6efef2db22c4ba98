//! Crawler module for concurrent URL graph exploration
//!
//! This module contains the core crawling logic, including:
//! - The `Fetcher` capability the crawler pulls pages through
//! - A canned-results `FixtureFetcher`
//! - The concurrent coordinator that spawns and joins exploration tasks

mod coordinator;
mod fetcher;
mod fixture;

pub use coordinator::{crawl, Crawler};
pub use fetcher::{Fetcher, Page};
pub use fixture::FixtureFetcher;

pub use crate::output::{CrawlReport, FetchFailure};
