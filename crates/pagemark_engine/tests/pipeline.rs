use std::sync::Mutex;

use pagemark_engine::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, FetchSettings, Fetcher, InputError,
    LogProgressSink, ProgressSink, ReqwestFetcher, ScrapeError, ScrapeEvent, Scraper,
};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves a fixed page for every URL except those listed as failing.
struct StubFetcher {
    failing: Vec<String>,
}

#[async_trait::async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        if self.failing.iter().any(|f| f == url) {
            return Err(FetchError::new(FailureKind::Network, "connection refused"));
        }
        let html = format!("<title>Page {url}</title><div class=\"content\"><p>{url}</p></div>");
        Ok(FetchOutput {
            bytes: html.into_bytes(),
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                content_type: Some("text/html; charset=utf-8".to_string()),
                byte_len: 0,
            },
        })
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<ScrapeEvent>>,
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: ScrapeEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn urls(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("https://site{i}.example/")).collect()
}

#[tokio::test]
async fn one_failing_url_does_not_abort_the_batch() {
    pagemark_logging::initialize_for_tests();
    let urls = urls(5);
    let scraper = Scraper::new(StubFetcher {
        failing: vec![urls[2].clone()],
    });
    let sink = RecordingSink::default();

    let report = scraper.scrape_all(&urls, &sink).await;

    assert_eq!(report.documents.len(), 4);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].url, "https://site3.example/");
    assert!(report.failed[0].reason.contains("connection refused"));
    let processed: Vec<_> = report.documents.iter().map(|d| d.url.as_str()).collect();
    assert_eq!(
        processed,
        vec![
            "https://site1.example/",
            "https://site2.example/",
            "https://site4.example/",
            "https://site5.example/",
        ]
    );
    assert_eq!(report.documents[0].content, "https://site1.example/");

    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 10);
    assert_eq!(
        events[0],
        ScrapeEvent::Started {
            index: 0,
            total: 5,
            url: "https://site1.example/".to_string()
        }
    );
    assert!(matches!(events[5], ScrapeEvent::Failed { index: 2, .. }));
}

#[tokio::test]
async fn invalid_url_is_recorded_as_failure() {
    let scraper = Scraper::new(StubFetcher { failing: Vec::new() });
    let list = vec!["not a url".to_string(), "https://ok.example/".to_string()];
    let report = scraper.scrape_all(&list, &LogProgressSink).await;

    assert_eq!(report.failed_urls(), vec!["not a url"]);
    assert_eq!(report.documents.len(), 1);
}

#[tokio::test]
async fn url_file_batch_skips_blank_lines() {
    let temp = tempfile::TempDir::new().unwrap();
    let list = temp.path().join("urls.txt");
    std::fs::write(&list, "https://a.example/\n\n   \nhttps://b.example/\n").unwrap();

    let scraper = Scraper::new(StubFetcher { failing: Vec::new() });
    let report = scraper
        .scrape_url_file(&list, &RecordingSink::default())
        .await
        .unwrap();
    assert_eq!(report.total(), 2);
    assert!(report.failed.is_empty());
}

#[tokio::test]
async fn missing_url_file_aborts_the_invocation() {
    let temp = tempfile::TempDir::new().unwrap();
    let scraper = Scraper::new(StubFetcher { failing: Vec::new() });
    let result = scraper
        .scrape_url_file(&temp.path().join("absent.txt"), &RecordingSink::default())
        .await;
    assert!(matches!(result, Err(InputError::Missing(_))));
}

#[tokio::test]
async fn scrape_end_to_end_over_http() {
    let server = MockServer::start().await;
    let page = r#"<html><head><title>Docs Home</title><script>track()</script></head>
        <body>
          <nav><a href="/nav">Nav</a></nav>
          <div class="sidebar"><p>Side</p></div>
          <main class="docs-main">
            <h1>Welcome</h1>
            <p>Read the <a href="/docs/page">guide</a>.</p>
            <img src="logo.png" alt="Logo">
          </main>
          <footer>Footer</footer>
        </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
        .mount(&server)
        .await;

    let scraper = Scraper::new(ReqwestFetcher::new(FetchSettings::default()).unwrap());
    let url = format!("{}/x", server.uri());
    let doc = scraper.scrape(&url).await.expect("scrape ok");

    let base = server.uri();
    assert_eq!(doc.url, url);
    assert_eq!(doc.title, "Docs Home");
    assert_eq!(
        doc.content,
        format!(
            "# Welcome\n\nRead the guide.\n\n[guide]({base}/docs/page)\n![Logo]({base}/logo.png)"
        )
    );
}

#[tokio::test]
async fn empty_body_is_a_scrape_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("  \n", "text/html"))
        .mount(&server)
        .await;

    let scraper = Scraper::new(ReqwestFetcher::new(FetchSettings::default()).unwrap());
    let url = format!("{}/empty", server.uri());
    let err = scraper.scrape(&url).await.unwrap_err();
    assert_eq!(err, ScrapeError::EmptyDocument(url));
}

#[tokio::test]
async fn http_error_surfaces_as_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let scraper = Scraper::new(ReqwestFetcher::new(FetchSettings::default()).unwrap());
    let err = scraper
        .scrape(&format!("{}/gone", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ScrapeError::Fetch(FetchError {
            kind: FailureKind::HttpStatus(410),
            ..
        })
    ));
}

#[tokio::test]
async fn find_returns_same_host_links_from_whole_page() {
    let server = MockServer::start().await;
    let page = r#"<body>
        <nav><a href="/menu">Menu</a></nav>
        <a href="/b">B</a><a href="/a">A</a>
        <a href="https://elsewhere.example/c">C</a>
    </body>"#;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(page, "text/html"))
        .mount(&server)
        .await;

    let scraper = Scraper::new(ReqwestFetcher::new(FetchSettings::default()).unwrap());
    let base = server.uri();
    let found = scraper
        .find_same_domain_urls(&format!("{base}/"))
        .await
        .unwrap();
    assert_eq!(
        found,
        vec![
            format!("{base}/a"),
            format!("{base}/b"),
            format!("{base}/menu")
        ]
    );
}
