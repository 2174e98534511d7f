use std::time::Duration;

use pagemark_engine::{FailureKind, FetchSettings, Fetcher, ReqwestFetcher, BROWSER_USER_AGENT};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(settings: FetchSettings) -> ReqwestFetcher {
    ReqwestFetcher::new(settings).expect("client builds")
}

#[tokio::test]
async fn fetcher_returns_html_bytes_and_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/doc", server.uri());
    let output = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .expect("fetch ok");

    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, url);
    assert_eq!(output.metadata.byte_len, 15);
    assert!(!output.metadata.redirected());
    assert!(output
        .metadata
        .content_type
        .unwrap()
        .starts_with("text/html"));
    assert_eq!(output.bytes, b"<html>ok</html>");
}

#[tokio::test]
async fn fetcher_follows_redirects_and_records_final_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/new", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>moved</p>", "text/html"))
        .mount(&server)
        .await;

    let url = format!("{}/old", server.uri());
    let output = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .expect("redirect followed");

    assert_eq!(output.metadata.original_url, url);
    assert_eq!(output.metadata.final_url, format!("{}/new", server.uri()));
    assert!(output.metadata.redirected());
    assert_eq!(output.bytes, b"<p>moved</p>");
}

#[tokio::test]
async fn fetcher_identifies_as_a_browser() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>hi</p>", "text/html"))
        .mount(&server)
        .await;

    let url = format!("{}/ua", server.uri());
    let output = fetcher(FetchSettings::default()).fetch(&url).await;
    assert!(output.is_ok(), "unexpected failure: {output:?}");

    let requests = server.received_requests().await.expect("recording enabled");
    let agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok());
    assert_eq!(agent, Some(BROWSER_USER_AGENT));
}

#[tokio::test]
async fn fetcher_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let err = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetcher_rejects_invalid_url_without_network() {
    let err = fetcher(FetchSettings::default())
        .fetch("not a url")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn fetcher_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let url = format!("{}/slow", server.uri());

    let err = fetcher(settings).fetch(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetcher_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html")
                .insert_header("Content-Length", "11")
                .set_body_string("01234567890"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let url = format!("{}/large", server.uri());

    let err = fetcher(settings).fetch(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn fetcher_accepts_any_content_type_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>plain</p>", "text/plain"))
        .mount(&server)
        .await;
    let url = format!("{}/page.txt", server.uri());

    let output = fetcher(FetchSettings::default())
        .fetch(&url)
        .await
        .expect("any type allowed");
    assert_eq!(output.bytes, b"<p>plain</p>");
}

#[tokio::test]
async fn fetcher_rejects_types_outside_a_configured_allowlist() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;
    let url = format!("{}/data.json", server.uri());

    let html_only = FetchSettings {
        allowed_content_types: vec!["text/html".to_string()],
        ..FetchSettings::default()
    };
    let err = fetcher(html_only).fetch(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "application/json".to_string()
        }
    );
}

#[test]
fn default_settings_accept_invalid_certificates() {
    let settings = FetchSettings::default();
    assert!(settings.accept_invalid_certs);
    assert!(settings.allowed_content_types.is_empty());
    assert_eq!(settings.user_agent, BROWSER_USER_AGENT);
}
