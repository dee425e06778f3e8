//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The shared frontier queue and visited set
//! - HTTP fetching behind the `Fetch` trait
//! - Title and link extraction from the HTML token stream
//! - Result aggregation across workers
//! - Overall crawl coordination and shutdown

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod results;
mod visited;

pub use coordinator::{CrawlOptions, CrawlReport, Crawler};
pub use fetcher::{build_http_client, Fetch, HttpFetcher};
pub use frontier::Frontier;
pub use parser::{is_absolute_link, parse_html, ParsedPage};
pub use results::{FetchFailure, ResultStore};
pub use visited::VisitedSet;

use crate::config::Config;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed and limits
/// 2. Build the HTTP client
/// 3. Run the worker pool until the budget is spent or the frontier is exhausted
/// 4. Return the title → link count report
///
/// # Example
///
/// ```no_run
/// use breadth_crawl::config::{resolve_config, ConfigOverrides};
/// use breadth_crawl::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let overrides = ConfigOverrides {
///     seed: Some("https://example.com/".to_string()),
///     ..Default::default()
/// };
/// let config = resolve_config(None, &overrides)?;
/// let report = crawl(&config).await?;
/// println!("{} pages claimed", report.pages_claimed);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    Crawler::from_config(config)?
        .run(&config.crawler.seed)
        .await
}
