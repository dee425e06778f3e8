//! Markdown report generation

use crate::crawler::CrawlReport;
use crate::output::report::display_title;
use crate::output::{OutputError, OutputResult};
use chrono::Utc;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a crawl report as markdown to `output_path`
pub fn write_markdown_report(report: &CrawlReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    File::create(output_path)
        .and_then(|mut file| file.write_all(markdown.as_bytes()))
        .map_err(|source| OutputError::Write {
            path: output_path.display().to_string(),
            source,
        })
}

/// Formats a crawl report as markdown
pub fn format_markdown_report(report: &CrawlReport) -> String {
    let mut md = String::new();

    md.push_str("# Crawl Report\n\n");

    md.push_str("## Summary\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        report.elapsed.as_secs_f64()
    ));
    md.push_str(&format!("- **Stop Reason**: {}\n", report.stop_reason));
    md.push_str(&format!("- **Pages Claimed**: {}\n", report.pages_claimed));
    md.push_str(&format!("- **Pages Parsed**: {}\n", report.pages_parsed));
    md.push_str(&format!("- **Fetch Failures**: {}\n", report.failures.len()));
    md.push_str(&format!("- **Total Links**: {}\n\n", report.total_links()));

    md.push_str("## Pages\n\n");
    if report.pages.is_empty() {
        md.push_str("_No pages were parsed successfully._\n\n");
    } else {
        md.push_str("| Title | Links |\n");
        md.push_str("|-------|-------|\n");
        for (title, links) in &report.pages {
            md.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(display_title(title)),
                links
            ));
        }
        md.push('\n');
    }

    if !report.failures.is_empty() {
        md.push_str("## Failures\n\n");
        for failure in &report.failures {
            md.push_str(&format!("- `{}`: {}\n", failure.url, failure.reason));
        }
        md.push('\n');
    }

    md
}

/// Keeps a title from breaking the table layout
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}
