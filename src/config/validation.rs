use crate::config::types::{Config, CrawlerConfig, PageEntry};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Upper bound for `max-concurrent-fetches`
pub const MAX_CONCURRENT_FETCHES: usize = 1024;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_pages(&config.pages)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.seed.trim().is_empty() {
        return Err(ConfigError::Validation("seed cannot be empty".to_string()));
    }

    validate_url(&config.seed, "seed")?;

    if config.max_concurrent_fetches > MAX_CONCURRENT_FETCHES {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be at most {}, got {}",
            MAX_CONCURRENT_FETCHES, config.max_concurrent_fetches
        )));
    }

    Ok(())
}

/// Validates fixture pages: URLs parse, are unique, and links parse
fn validate_pages(pages: &[PageEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for page in pages {
        validate_url(&page.url, "page")?;

        if !seen.insert(page.url.as_str()) {
            return Err(ConfigError::Validation(format!(
                "Duplicate page URL '{}'",
                page.url
            )));
        }

        for link in &page.links {
            validate_url(link, &format!("link on '{}'", page.url))?;
        }
    }

    Ok(())
}

fn validate_url(url: &str, what: &str) -> Result<(), ConfigError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} URL '{}': {}", what, url, e)))
}
