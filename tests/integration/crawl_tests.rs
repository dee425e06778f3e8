//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use breadth_crawl::config::{resolve_config, Config, ConfigOverrides};
use breadth_crawl::crawler::{crawl, Crawler};
use breadth_crawl::output::write_markdown_report;
use breadth_crawl::{ConfigError, CrawlError, StopReason};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration crawling from `seed`
fn create_test_config(seed: &str, max_pages: usize, concurrency: usize) -> Config {
    let mut config = Config::default();
    config.crawler.seed = seed.to_string();
    config.crawler.max_pages = max_pages;
    config.crawler.concurrency = concurrency;
    config.crawler.idle_grace_ms = 100; // Short for testing
    config.crawler.poll_interval_ms = 10;
    config.http.user_agent = "TestBot/1.0".to_string();
    config.http.timeout_secs = 5;
    config
}

fn html(title: &str, links: &[String]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="{}">link</a>"#, link))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, anchors
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_until_frontier_exhausted() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html("Home", &[format!("{}/a", base), format!("{}/b", base)]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        html("Page A", &[format!("{}/b", base), format!("{}/", base)]),
        1,
    )
    .await;
    mount_page(&mock_server, "/b", html("Page B", &[]), 1).await;

    let config = create_test_config(&format!("{}/", base), 10, 2);
    let report = crawl(&config).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(report.pages_claimed, 3);
    assert_eq!(report.pages_parsed, 3);
    assert!(report.failures.is_empty());
    assert_eq!(report.pages.get("Home"), Some(&2));
    assert_eq!(report.pages.get("Page A"), Some(&2));
    assert_eq!(report.pages.get("Page B"), Some(&0));
    assert_eq!(report.total_links(), 4);
}

#[tokio::test]
async fn test_relative_links_are_ignored() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            "Home",
            &["/relative".to_string(), "#top".to_string(), format!("{}/next", base)],
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/next", html("Next", &[]), 1).await;
    mount_page(&mock_server, "/relative", html("Relative", &[]), 0).await;

    let config = create_test_config(&format!("{}/", base), 10, 2);
    let report = crawl(&config).await.unwrap();

    assert_eq!(report.pages_claimed, 2);
    assert_eq!(report.pages.get("Home"), Some(&1));
    assert!(!report.pages.contains_key("Relative"));
}

#[tokio::test]
async fn test_sloppy_markup_still_yields_links() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        format!(
            r#"<title>Fish &amp Chips</title><p>a&nbsp b</p><div class="x" class="y"></div><a href="{}/next">next</a>"#,
            base
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/next", html("Next", &[]), 1).await;

    let config = create_test_config(&format!("{}/", base), 10, 2);
    let report = crawl(&config).await.unwrap();

    assert_eq!(report.pages_claimed, 2);
    assert_eq!(report.pages.get("Fish & Chips"), Some(&1));
    assert_eq!(report.pages.get("Next"), Some(&0));
}

#[tokio::test]
async fn test_same_title_collapses_to_one_entry() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(&mock_server, "/", html("Same", &[format!("{}/x", base)]), 1).await;
    mount_page(&mock_server, "/x", html("Same", &[]), 1).await;

    let config = create_test_config(&format!("{}/", base), 10, 1);
    let report = crawl(&config).await.unwrap();

    assert_eq!(report.pages_parsed, 2);
    assert_eq!(report.pages.len(), 1);
    // The later page overwrites the earlier one
    assert_eq!(report.pages.get("Same"), Some(&0));
}

#[tokio::test]
async fn test_failed_page_is_recorded_and_crawl_continues() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(
            "Home",
            &[format!("{}/missing", base), format!("{}/ok", base)],
        ),
        1,
    )
    .await;
    mount_page(&mock_server, "/ok", html("Ok", &[]), 1).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base), 10, 2);
    let report = crawl(&config).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(report.pages_claimed, 3);
    assert_eq!(report.pages_parsed, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].url, format!("{}/missing", base));
    assert!(report.failures[0].reason.contains("404"));
    assert!(report.pages.contains_key("Ok"));
}

#[tokio::test]
async fn test_unreachable_seed_terminates_cleanly() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&format!("{}/", base), 5, 4);
    let report = crawl(&config).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(report.pages_claimed, 1);
    assert_eq!(report.pages_parsed, 0);
    assert!(report.pages.is_empty());
    assert_eq!(report.failures.len(), 1);
}

#[tokio::test]
async fn test_budget_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let children: Vec<String> = (1..=9).map(|i| format!("{}/p{}", base, i)).collect();
    mount_page(&mock_server, "/", html("Home", &children), 1).await;
    for i in 1..=9 {
        Mock::given(method("GET"))
            .and(path(format!("/p{}", i)))
            .respond_with(ResponseTemplate::new(200).set_body_string(html(&format!("P{}", i), &[])))
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(&format!("{}/", base), 3, 1);
    let report = crawl(&config).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::BudgetReached);
    assert_eq!(report.pages_claimed, 3);
    assert_eq!(report.pages.len(), 3);
    assert_eq!(report.pages.get("Home"), Some(&9));
    // Breadth-first with one worker: the first two children follow the seed
    assert!(report.pages.contains_key("P1"));
    assert!(report.pages.contains_key("P2"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_budget_with_many_workers_stays_bounded() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let children: Vec<String> = (1..=20).map(|i| format!("{}/p{}", base, i)).collect();
    mount_page(&mock_server, "/", html("Home", &children), 1).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html("Leaf", &[])))
        .mount(&mock_server)
        .await;

    let max_pages = 5;
    let concurrency = 4;
    let config = create_test_config(&format!("{}/", base), max_pages, concurrency);
    let report = crawl(&config).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::BudgetReached);
    assert!(report.pages_claimed >= max_pages);
    assert!(report.pages_claimed <= max_pages + concurrency - 1);
}

#[tokio::test]
async fn test_invalid_seed_is_config_error() {
    let config = create_test_config("ftp://example.com/", 5, 2);
    let crawler = Crawler::from_config(&config).unwrap();

    let result = crawler.run("ftp://example.com/").await;
    assert!(matches!(result, Err(CrawlError::Config(_))));
}

#[test]
fn test_missing_seed_is_rejected() {
    let result = resolve_config(None, &ConfigOverrides::default());
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[tokio::test]
async fn test_config_file_with_overrides() {
    use std::io::Write;

    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    mount_page(&mock_server, "/", html("Only", &[]), 1).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[crawler]
seed = "https://not-used.invalid/"
max-pages = 100
idle-grace-ms = 100
poll-interval-ms = 10
"#
    )
    .unwrap();

    let overrides = ConfigOverrides {
        seed: Some(format!("{}/", base)),
        concurrency: Some(2),
        ..Default::default()
    };
    let config = resolve_config(Some(file.path()), &overrides).unwrap();
    assert_eq!(config.crawler.max_pages, 100);
    assert_eq!(config.crawler.concurrency, 2);

    let report = crawl(&config).await.unwrap();
    assert_eq!(report.pages.get("Only"), Some(&0));
}

#[tokio::test]
async fn test_markdown_report_from_crawl() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    mount_page(&mock_server, "/", html("Home", &[format!("{}/a", base)]), 1).await;
    mount_page(&mock_server, "/a", html("Page A", &[]), 1).await;

    let config = create_test_config(&format!("{}/", base), 10, 2);
    let report = crawl(&config).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("summary.md");
    write_markdown_report(&report, &output).unwrap();

    let markdown = std::fs::read_to_string(&output).unwrap();
    assert!(markdown.contains("| Home | 1 |"));
    assert!(markdown.contains("| Page A | 0 |"));
    assert!(markdown.contains("frontier_exhausted"));
}
