//! Configuration module for Breadth-Crawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files, and merging them with command-line overrides.
//!
//! # Example
//!
//! ```no_run
//! use breadth_crawl::config::{resolve_config, ConfigOverrides};
//! use std::path::Path;
//!
//! let config = resolve_config(Some(Path::new("crawl.toml")), &ConfigOverrides::default()).unwrap();
//! println!("Crawler will claim at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config, resolve_config, ConfigOverrides};
pub use validation::{validate, validate_limits, validate_seed, MAX_CONCURRENCY};
