//! Plain-text report for the terminal

use crate::crawler::CrawlReport;

/// Prints a crawl report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}

/// Formats a crawl report as plain text
///
/// Titles are listed in sorted order; an empty title is shown as `(untitled)`.
pub fn format_report(report: &CrawlReport) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Report ===\n\n");
    out.push_str(&format!(
        "Crawled {} pages ({} parsed, {} failed) in {:.2}s\n",
        report.pages_claimed,
        report.pages_parsed,
        report.failures.len(),
        report.elapsed.as_secs_f64()
    ));
    out.push_str(&format!("Stopped: {}\n\n", report.stop_reason));

    if report.pages.is_empty() {
        out.push_str("No pages were parsed successfully.\n");
    } else {
        out.push_str("Crawled result:\n");
        for (title, links) in &report.pages {
            out.push_str(&format!("  {} : {} urls\n", display_title(title), links));
        }
    }

    if !report.failures.is_empty() {
        out.push_str(&format!("\nFailures ({}):\n", report.failures.len()));
        for failure in &report.failures {
            out.push_str(&format!("  - {}: {}\n", failure.url, failure.reason));
        }
    }

    out
}

pub(crate) fn display_title(title: &str) -> &str {
    if title.is_empty() {
        "(untitled)"
    } else {
        title
    }
}
