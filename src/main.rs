//! Ripple-Crawl main entry point
//!
//! This is the command-line interface for the Ripple-Crawl concurrent crawler.

use clap::Parser;
use ripple_crawl::config::{load_config_with_hash, Config, CrawlerConfig};
use ripple_crawl::output::print_report;
use ripple_crawl::{Crawler, FixtureFetcher};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: &str = "https://golang.org/";
const DEFAULT_MAX_DEPTH: u32 = 4;

/// Ripple-Crawl: a concurrent crawler over a shared visited set
///
/// Crawls a canned site described in a TOML file, fetching every reachable
/// page within the depth bound exactly once. Without a config file the
/// built-in Go-tour site is crawled.
#[derive(Parser, Debug)]
#[command(name = "ripple-crawl")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent crawler over a shared visited set", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the seed URL
    #[arg(long)]
    seed: Option<String>,

    /// Override the maximum crawl depth (1 = only the seed)
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Override the bound on in-flight fetches (0 = unbounded)
    #[arg(long)]
    max_concurrent_fetches: Option<usize>,

    /// List every fetched URL in the report
    #[arg(long)]
    list_pages: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (mut crawler_config, fetcher) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((config, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    let Config { crawler, pages } = config;
                    (crawler, FixtureFetcher::from_entries(&pages))
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration given, using the built-in Go-tour site");
            let crawler = CrawlerConfig {
                seed: DEFAULT_SEED.to_string(),
                max_depth: DEFAULT_MAX_DEPTH,
                max_concurrent_fetches: 0,
            };
            (crawler, FixtureFetcher::golang_tour())
        }
    };

    if let Some(seed) = cli.seed {
        crawler_config.seed = seed;
    }
    if let Some(max_depth) = cli.max_depth {
        crawler_config.max_depth = max_depth;
    }
    if let Some(limit) = cli.max_concurrent_fetches {
        crawler_config.max_concurrent_fetches = limit;
    }

    if cli.dry_run {
        handle_dry_run(&crawler_config, &fetcher);
        return Ok(());
    }

    handle_crawl(crawler_config, fetcher, cli.list_pages, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_crawl=info,warn"),
            1 => EnvFilter::new("ripple_crawl=debug,info"),
            2 => EnvFilter::new("ripple_crawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &CrawlerConfig, fetcher: &FixtureFetcher) {
    println!("=== Ripple-Crawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Max depth: {}", config.max_depth);
    if config.max_concurrent_fetches == 0 {
        println!("  Max concurrent fetches: unbounded");
    } else {
        println!("  Max concurrent fetches: {}", config.max_concurrent_fetches);
    }

    println!("\nFixture pages: {}", fetcher.len());

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: CrawlerConfig,
    fetcher: FixtureFetcher,
    list_pages: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let crawler = Crawler::with_config(Arc::new(fetcher), &config);

    match crawler.run(&config.seed, config.max_depth).await {
        Ok(report) => {
            if !quiet {
                print_report(&report, list_pages);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
