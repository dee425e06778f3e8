//! Crawler coordinator - main crawl orchestration logic
//!
//! This module owns the worker pool and the three shared structures of a
//! crawl (frontier, visited set, result store). It:
//! - Seeds the frontier and launches a fixed number of workers
//! - Enforces the page budget and drives the Active → Draining → Terminated
//!   lifecycle
//! - Joins every worker and assembles the final report
//!
//! Locks are per structure and never held across a fetch, so fetches from
//! different workers overlap.

use crate::config::{validate_limits, validate_seed, Config, CrawlerConfig};
use crate::crawler::fetcher::{Fetch, HttpFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::parse_html;
use crate::crawler::results::{FetchFailure, ResultStore};
use crate::crawler::visited::VisitedSet;
use crate::state::{CrawlLifecycle, ShutdownHandle, StopReason};
use crate::{ConfigError, CrawlError};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// How often the coordinator checks the budget and reports progress
const MONITOR_INTERVAL: Duration = Duration::from_millis(250);

/// Progress is logged every this many claimed pages
const PROGRESS_EVERY: usize = 10;

/// Limits and timings for one crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Page budget: number of URLs that may be claimed
    pub max_pages: usize,

    /// Number of concurrent workers
    pub concurrency: usize,

    /// How long the frontier must stay empty, with nothing in flight,
    /// before the crawl counts as exhausted
    pub idle_grace: Duration,

    /// Longest single wait for the frontier to refill
    pub poll_interval: Duration,
}

impl CrawlOptions {
    pub fn new(max_pages: usize, concurrency: usize) -> Self {
        Self {
            max_pages,
            concurrency,
            idle_grace: Duration::from_millis(500),
            poll_interval: Duration::from_millis(50),
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            concurrency: config.concurrency,
            idle_grace: Duration::from_millis(config.idle_grace_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }

    pub fn with_idle_grace(mut self, idle_grace: Duration) -> Self {
        self.idle_grace = idle_grace;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Checks limits and timings
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_limits(self.max_pages, self.concurrency)?;

        if self.poll_interval.is_zero() {
            return Err(ConfigError::Validation(
                "poll_interval must be non-zero".to_string(),
            ));
        }

        if self.idle_grace < self.poll_interval {
            return Err(ConfigError::Validation(format!(
                "idle_grace ({:?}) must be >= poll_interval ({:?})",
                self.idle_grace, self.poll_interval
            )));
        }

        Ok(())
    }
}

/// Final outcome of a crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Title → outbound link count; same-titled pages share an entry
    pub pages: BTreeMap<String, usize>,

    /// Fetches that failed, in the order they were recorded
    pub failures: Vec<FetchFailure>,

    /// URLs claimed, whether or not their fetch succeeded
    pub pages_claimed: usize,

    /// Pages fetched and parsed successfully
    pub pages_parsed: usize,

    pub stop_reason: StopReason,

    pub elapsed: Duration,
}

impl CrawlReport {
    /// Sum of link counts over all stored titles
    pub fn total_links(&self) -> usize {
        self.pages.values().sum()
    }
}

/// Everything a worker shares with the coordinator for one crawl
struct CrawlContext {
    frontier: Frontier,
    visited: VisitedSet,
    results: ResultStore,
    lifecycle: Arc<CrawlLifecycle>,
    fetcher: Arc<dyn Fetch>,
    options: CrawlOptions,
    /// Workers between a dequeue attempt and the end of processing its URL
    in_flight: AtomicUsize,
    started: Instant,
}

impl CrawlContext {
    fn budget_spent(&self) -> bool {
        self.visited.size() >= self.options.max_pages
    }

    /// New links are only queued while the crawl is active and under budget
    fn accepting_work(&self) -> bool {
        self.lifecycle.is_active() && !self.budget_spent()
    }

    /// Claims, fetches, parses and records one dequeued URL
    async fn process_url(&self, worker_id: usize, url: &str) {
        if !self.accepting_work() {
            return;
        }

        if !self.visited.claim(url) {
            tracing::trace!("Worker {} skipping already claimed {}", worker_id, url);
            return;
        }

        let claimed = self.visited.size();
        tracing::debug!("Worker {} claimed {} ({} claimed)", worker_id, url, claimed);

        if claimed >= self.options.max_pages {
            self.lifecycle.begin_draining(StopReason::BudgetReached);
        }

        if claimed % PROGRESS_EVERY == 0 {
            let rate = claimed as f64 / self.started.elapsed().as_secs_f64().max(f64::EPSILON);
            tracing::info!(
                "Progress: {} pages claimed, {} in frontier, {:.2} pages/sec",
                claimed,
                self.frontier.size(),
                rate
            );
        }

        let body = match self.fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Fetch failed: {}", e);
                self.results.record_failure(url, e.to_string());
                return;
            }
        };

        let parsed = parse_html(&body);
        if parsed.parse_errors > 0 {
            tracing::trace!(
                "Recovered from {} markup errors in {}",
                parsed.parse_errors,
                url
            );
        }

        if let Some(previous) = self.results.record(&parsed.title, parsed.links.len()) {
            tracing::debug!(
                "Title {:?} already recorded with {} links, overwritten by {}",
                parsed.title,
                previous,
                url
            );
        }

        let queued = self.enqueue_links(parsed.links);
        tracing::debug!("Queued {} new links from {}", queued, url);
    }

    fn enqueue_links(&self, links: Vec<String>) -> usize {
        let mut queued = 0;
        for link in links {
            if !self.accepting_work() {
                break;
            }
            if self.visited.is_claimed(&link) {
                continue;
            }
            if self.frontier.enqueue(link) {
                queued += 1;
            }
        }
        queued
    }
}

/// One worker's loop: dequeue, claim, fetch, parse, record, repeat
async fn run_worker(worker_id: usize, ctx: Arc<CrawlContext>) {
    tracing::debug!("Worker {} started", worker_id);
    let mut idle_since: Option<Instant> = None;

    loop {
        if !ctx.lifecycle.is_active() {
            break;
        }

        if ctx.budget_spent() {
            ctx.lifecycle.begin_draining(StopReason::BudgetReached);
            break;
        }

        // Counted as in flight before the dequeue, so an empty frontier plus
        // zero in flight really means no worker can still add links.
        ctx.in_flight.fetch_add(1, Ordering::SeqCst);
        let Some(url) = ctx.frontier.dequeue() else {
            let others_in_flight = ctx.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;

            if others_in_flight == 0 && ctx.frontier.is_empty() {
                let since = *idle_since.get_or_insert_with(Instant::now);
                if since.elapsed() >= ctx.options.idle_grace {
                    ctx.lifecycle.begin_draining(StopReason::FrontierExhausted);
                    break;
                }
            } else {
                idle_since = None;
            }

            tokio::select! {
                _ = ctx.frontier.wait_for_arrival(ctx.options.poll_interval) => {}
                _ = ctx.lifecycle.changed() => {}
            }
            continue;
        };

        idle_since = None;
        ctx.process_url(worker_id, &url).await;
        ctx.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    tracing::debug!("Worker {} exiting", worker_id);
}

/// Main crawler coordinator structure
///
/// A `Crawler` runs exactly one crawl; build a new one for each crawl.
pub struct Crawler {
    fetcher: Arc<dyn Fetch>,
    options: CrawlOptions,
    lifecycle: Arc<CrawlLifecycle>,
}

impl Crawler {
    /// Creates a crawler that fetches pages through `fetcher`
    pub fn new(fetcher: Arc<dyn Fetch>, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            options,
            lifecycle: Arc::new(CrawlLifecycle::new()),
        }
    }

    /// Creates a crawler backed by an HTTP client built from `config`
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::from_config(&config.http)?;
        Ok(Self::new(
            Arc::new(fetcher),
            CrawlOptions::from_config(&config.crawler),
        ))
    }

    /// Returns a handle that can stop this crawl early
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle::new(self.lifecycle.clone())
    }

    /// Runs the crawl from `seed` until the budget is spent, the frontier is
    /// exhausted or shutdown is requested
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl ran; per-page failures are inside the report
    /// * `Err(CrawlError::Config)` - Invalid seed or options; no worker was started
    pub async fn run(self, seed: &str) -> Result<CrawlReport, CrawlError> {
        validate_seed(seed)?;
        self.options.validate()?;

        let ctx = Arc::new(CrawlContext {
            frontier: Frontier::new(),
            visited: VisitedSet::new(),
            results: ResultStore::new(),
            lifecycle: self.lifecycle.clone(),
            fetcher: self.fetcher.clone(),
            options: self.options.clone(),
            in_flight: AtomicUsize::new(0),
            started: Instant::now(),
        });

        ctx.frontier.enqueue(seed);
        tracing::info!(
            "Starting crawl from {} (max pages: {}, workers: {})",
            seed,
            self.options.max_pages,
            self.options.concurrency
        );

        let mut workers = JoinSet::new();
        for worker_id in 0..self.options.concurrency {
            workers.spawn(run_worker(worker_id, ctx.clone()));
        }

        let mut monitor = tokio::time::interval(MONITOR_INTERVAL);
        loop {
            tokio::select! {
                joined = workers.join_next() => match joined {
                    Some(Ok(())) => {}
                    Some(Err(e)) => tracing::error!("Worker task failed: {}", e),
                    None => break,
                },
                _ = monitor.tick() => {
                    if ctx.budget_spent() {
                        ctx.lifecycle.begin_draining(StopReason::BudgetReached);
                    }
                    tracing::trace!(
                        "Monitor: phase {}, {} claimed, {} in frontier, {} in flight",
                        ctx.lifecycle.phase(),
                        ctx.visited.size(),
                        ctx.frontier.size(),
                        ctx.in_flight.load(Ordering::SeqCst)
                    );
                }
            }
        }

        // Only reachable while still active if every worker died abnormally.
        if ctx.budget_spent() {
            ctx.lifecycle.begin_draining(StopReason::BudgetReached);
        } else {
            ctx.lifecycle.begin_draining(StopReason::FrontierExhausted);
        }
        ctx.lifecycle.terminate();

        let report = CrawlReport {
            pages: ctx.results.snapshot(),
            failures: ctx.results.failures(),
            pages_claimed: ctx.visited.size(),
            pages_parsed: ctx.results.records(),
            stop_reason: ctx
                .lifecycle
                .stop_reason()
                .unwrap_or(StopReason::FrontierExhausted),
            elapsed: ctx.started.elapsed(),
        };

        tracing::info!(
            "Crawl completed ({}): {} pages claimed, {} parsed, {} failed in {:?}",
            report.stop_reason,
            report.pages_claimed,
            report.pages_parsed,
            report.failures.len(),
            report.elapsed
        );

        Ok(report)
    }
}
