//! Output module for presenting crawl reports
//!
//! This module handles:
//! - Printing the title → link count table and summary to stdout
//! - Writing the same report as a markdown file

mod markdown;
mod report;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{format_report, print_report};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write report to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
