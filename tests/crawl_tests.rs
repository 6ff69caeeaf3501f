//! End-to-end tests for the crawl-and-mirror engine
//!
//! These tests use wiremock to serve pages and assets over real HTTP and a
//! stub renderer with a canned link map in place of the headless browser.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use webmirror::browser::PageRenderer;
use webmirror::config::CrawlConfig;
use webmirror::crawler::Coordinator;
use webmirror::Result;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renderer standing in for the headless browser: returns canned links.
struct StubRenderer {
    links: HashMap<String, Vec<String>>,
}

impl StubRenderer {
    fn new(links: &[(&str, &[&str])]) -> Arc<Self> {
        Arc::new(Self {
            links: links
                .iter()
                .map(|(page, targets)| {
                    (
                        page.to_string(),
                        targets.iter().map(|t| t.to_string()).collect(),
                    )
                })
                .collect(),
        })
    }
}

#[async_trait]
impl PageRenderer for StubRenderer {
    async fn fetch_links(&self, url: &Url) -> Result<Vec<String>> {
        Ok(self.links.get(url.as_str()).cloned().unwrap_or_default())
    }
}

fn create_test_config(seed: &str, output_dir: PathBuf, max_depth: u32) -> CrawlConfig {
    CrawlConfig {
        seed_url: Url::parse(seed).unwrap(),
        output_dir,
        workers: 4,
        page_delay: Duration::from_millis(0),
        max_depth,
        include_keywords: vec![],
        exclude_keywords: vec![],
        stay_within_domain: true,
    }
}

fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

#[tokio::test]
async fn test_full_mirror_with_assets() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "Home Page",
            r#"<link rel="stylesheet" href="/style.css">
               <script src="/app.js"></script>
               <img src="/logo.png">
               <a href="/about">About</a>"#,
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page("About Us", "<p>plain page</p>")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/style.css"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body {}"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/app.js"))
        .respond_with(ResponseTemplate::new(200).set_body_string("console.log(1)"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]))
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let renderer = StubRenderer::new(&[(seed.as_str(), &[format!("{}/about", base).as_str()])]);

    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&seed, output.path().to_path_buf(), 1);

    let coordinator = Coordinator::new(config, renderer).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.summary.total_pages_found, 2);
    assert_eq!(report.summary.successful_pages, 2);
    assert_eq!(report.summary.failed_pages, 0);
    assert_eq!(report.summary.page_success_rate, "100.0%");
    assert_eq!(report.summary.total_files, 3);
    assert_eq!(report.summary.successful_files, 3);
    assert!(report.failed_urls.is_empty());

    // Mirror layout: one directory per page, index.html plus kind subdirs.
    let home_dir = output.path().join("home-page");
    assert!(home_dir.join("index.html").is_file());
    assert!(home_dir.join("css/style.css").is_file());
    assert!(home_dir.join("js/app.js").is_file());
    assert!(home_dir.join("media/logo.png").is_file());
    assert!(output.path().join("about-us/index.html").is_file());

    // Report file on disk matches the returned report.
    let report_json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(output.path().join("final_report.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(report_json["summary"]["total_pages_found"], 2);
    assert_eq!(report_json["config"]["depth"], 1);
}

#[tokio::test]
async fn test_depth_zero_mirrors_only_seed() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "Seed Only",
            r#"<a href="/other">Other</a>"#,
        )))
        .mount(&server)
        .await;

    // The linked page must never be fetched with max_depth = 0.
    Mock::given(method("GET"))
        .and(path("/other"))
        .respond_with(ResponseTemplate::new(200).set_body_string("never"))
        .expect(0)
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let renderer = StubRenderer::new(&[(seed.as_str(), &[format!("{}/other", base).as_str()])]);

    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&seed, output.path().to_path_buf(), 0);

    let coordinator = Coordinator::new(config, renderer).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.summary.total_pages_found, 1);
    assert_eq!(report.summary.successful_pages, 1);
}

#[tokio::test]
async fn test_shared_asset_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    let body = r#"<link rel="stylesheet" href="/shared.css">"#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("First", body)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Second", body)))
        .mount(&server)
        .await;

    // Referenced by both pages, fetched exactly once.
    Mock::given(method("GET"))
        .and(path("/shared.css"))
        .respond_with(ResponseTemplate::new(200).set_body_string("body {}"))
        .expect(1)
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let renderer = StubRenderer::new(&[(seed.as_str(), &[format!("{}/second", base).as_str()])]);

    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&seed, output.path().to_path_buf(), 1);

    let coordinator = Coordinator::new(config, renderer).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    // Both references count toward total_files; the skipped one affects
    // neither the success nor the failure counter.
    assert_eq!(report.summary.total_files, 2);
    assert_eq!(report.summary.successful_files, 1);
    assert_eq!(report.summary.failed_files, 0);
}

#[tokio::test]
async fn test_failed_page_recorded_and_crawl_continues() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Root", "")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let gone = format!("{}/gone", base);
    let renderer = StubRenderer::new(&[(seed.as_str(), &[gone.as_str()])]);

    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&seed, output.path().to_path_buf(), 1);

    let coordinator = Coordinator::new(config, renderer).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.summary.total_pages_found, 2);
    assert_eq!(report.summary.successful_pages, 1);
    assert_eq!(report.summary.failed_pages, 1);
    assert_eq!(report.failed_urls, vec![gone]);
    assert_eq!(
        report.summary.successful_pages + report.summary.failed_pages,
        report.summary.total_pages_found
    );

    // The report lands on disk even with failures in the run.
    assert!(output.path().join("final_report.json").is_file());
}

#[tokio::test]
async fn test_failed_asset_counts_but_page_succeeds() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "Assets",
            r#"<img src="/ok.png"><img src="/missing.png">"#,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let renderer = StubRenderer::new(&[]);

    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&seed, output.path().to_path_buf(), 0);

    let coordinator = Coordinator::new(config, renderer).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    assert_eq!(report.summary.successful_pages, 1);
    assert_eq!(report.summary.failed_pages, 0);
    assert_eq!(report.summary.total_files, 2);
    assert_eq!(report.summary.successful_files, 1);
    assert_eq!(report.summary.failed_files, 1);
    assert!(report.failed_urls.is_empty());
}

#[tokio::test]
async fn test_shutdown_stops_downloads_but_writes_report() {
    let server = MockServer::start().await;
    let base = server.uri();

    // With shutdown requested nothing is ever downloaded.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Seed", "")))
        .expect(0)
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let renderer = StubRenderer::new(&[]);

    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&seed, output.path().to_path_buf(), 1);

    let coordinator = Coordinator::new(config, renderer).expect("Failed to create coordinator");
    coordinator.request_shutdown();
    let report = coordinator.run().await.expect("Crawl failed");

    // The seed is always part of the page set, but the download loop stops
    // before touching it; the report still reflects what accumulated.
    assert_eq!(report.summary.total_pages_found, 1);
    assert_eq!(report.summary.successful_pages, 0);
    assert_eq!(report.summary.failed_pages, 0);
    assert_eq!(report.summary.page_success_rate, "0.0%");
    assert!(output.path().join("final_report.json").is_file());
}

#[tokio::test]
async fn test_discovery_failure_still_mirrors_seed() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Lonely", "")))
        .mount(&server)
        .await;

    /// Renderer that always fails, as a crashed browser would.
    struct FailingRenderer;

    #[async_trait]
    impl PageRenderer for FailingRenderer {
        async fn fetch_links(&self, url: &Url) -> Result<Vec<String>> {
            Err(webmirror::MirrorError::Discovery {
                url: url.to_string(),
                message: "browser crashed".to_string(),
            })
        }
    }

    let seed = format!("{}/", base);
    let output = tempfile::tempdir().unwrap();
    let config = create_test_config(&seed, output.path().to_path_buf(), 2);

    let coordinator =
        Coordinator::new(config, Arc::new(FailingRenderer)).expect("Failed to create coordinator");
    let report = coordinator.run().await.expect("Crawl failed");

    // The caller includes the seed explicitly; the render failure only
    // costs the seed's outbound links.
    assert_eq!(report.summary.total_pages_found, 1);
    assert_eq!(report.summary.successful_pages, 1);
}
