use serde::Deserialize;

/// Main configuration structure for Breadth-Crawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from
    #[serde(default)]
    pub seed: String,

    /// Page budget: number of URLs that may be claimed
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Number of concurrent workers
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// How long the frontier must stay empty with nothing in flight before
    /// the crawl is considered exhausted (milliseconds)
    #[serde(rename = "idle-grace-ms", default = "default_idle_grace_ms")]
    pub idle_grace_ms: u64,

    /// Wait between retries while the frontier is empty (milliseconds)
    #[serde(rename = "poll-interval-ms", default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed: String::new(),
            max_pages: default_max_pages(),
            concurrency: default_concurrency(),
            idle_grace_ms: default_idle_grace_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(
        rename = "connect-timeout-secs",
        default = "default_connect_timeout_secs"
    )]
    pub connect_timeout_secs: u64,

    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Optional path for a markdown copy of the report
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

fn default_max_pages() -> usize {
    5
}

fn default_concurrency() -> usize {
    4
}

fn default_idle_grace_ms() -> u64 {
    500
}

fn default_poll_interval_ms() -> u64 {
    50
}

fn default_user_agent() -> String {
    format!("breadth-crawl/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_max_redirects() -> usize {
    10
}
