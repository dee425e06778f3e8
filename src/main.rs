//! Breadth-Crawl main entry point
//!
//! This is the command-line interface for the breadth-first crawler.

use anyhow::Context;
use breadth_crawl::config::{resolve_config, Config, ConfigOverrides};
use breadth_crawl::crawler::Crawler;
use breadth_crawl::output::{print_report, write_markdown_report};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Breadth-Crawl: a bounded, concurrent breadth-first web crawler
///
/// Starting from a seed URL, Breadth-Crawl follows absolute links in
/// breadth-first order until its page budget is spent or no links remain,
/// then prints each page title with its outbound link count.
#[derive(Parser, Debug)]
#[command(name = "breadth-crawl")]
#[command(version)]
#[command(about = "A bounded, concurrent breadth-first web crawler", long_about = None)]
struct Cli {
    /// Seed URL (overrides `seed` from the config file)
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of pages to claim
    #[arg(short = 'n', long)]
    max_pages: Option<usize>,

    /// Number of concurrent workers
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,

    /// Also write the report as markdown to this path
    #[arg(long, value_name = "PATH")]
    summary: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let overrides = ConfigOverrides {
        seed: cli.seed,
        max_pages: cli.max_pages,
        concurrency: cli.concurrency,
        summary_path: cli.summary,
    };

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }
    let config = match resolve_config(cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    handle_crawl(&config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("breadth_crawl=info,warn"),
            1 => EnvFilter::new("breadth_crawl=debug,info"),
            2 => EnvFilter::new("breadth_crawl=trace,debug"),
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

/// Runs the crawl, prints the report and writes the optional summary file
async fn handle_crawl(config: &Config, quiet: bool) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling from {} (max pages: {}, concurrency: {})",
        config.crawler.seed,
        config.crawler.max_pages,
        config.crawler.concurrency
    );

    let crawler = Crawler::from_config(config).context("failed to build crawler")?;

    let handle = crawler.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight pages");
            handle.shutdown();
        }
    });

    let report = crawler.run(&config.crawler.seed).await?;

    if !quiet {
        print_report(&report);
    }

    if let Some(path) = &config.output.summary_path {
        write_markdown_report(&report, Path::new(path))?;
        tracing::info!("Report written to: {}", path);
    }

    Ok(())
}
