//! Integration tests for `PageClient` against a local wiremock server.
//!
//! Covers the happy path, the retry budget for transport and status
//! failures, the "failure degrades to None" contract, and the linear
//! backoff timing (scaled down so the suite stays fast).

use std::time::{Duration, Instant};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ofertas_scraper::{PageClient, PageFetcher};

/// Client with no rate limiting and no backoff sleeps.
fn fast_client() -> PageClient {
    PageClient::new(Duration::from_secs(5), Duration::ZERO, "ofertas-test/0.1")
        .expect("failed to build test PageClient")
        .with_backoff_base(Duration::ZERO)
}

#[tokio::test]
async fn returns_the_body_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>ofertas</h1>"))
        .mount(&server)
        .await;

    let body = fast_client().fetch_text(&format!("{}/home", server.uri())).await;
    assert_eq!(body.as_deref(), Some("<h1>ofertas</h1>"));
}

#[tokio::test]
async fn retries_server_errors_until_one_succeeds() {
    let server = MockServer::start().await;

    // Two failures, then a good response: the mounts are consulted in
    // order, and the first stops matching once its budget is consumed.
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>recuperado</h1>"))
        .mount(&server)
        .await;

    let body = fast_client().fetch_text(&format!("{}/home", server.uri())).await;
    assert_eq!(body.as_deref(), Some("<h1>recuperado</h1>"));
}

#[tokio::test]
async fn gives_up_after_three_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let body = fast_client().fetch_text(&format!("{}/home", server.uri())).await;
    assert_eq!(body, None);
}

#[tokio::test]
async fn not_found_is_a_failure_like_any_other_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&server)
        .await;

    let body = fast_client().fetch_text(&format!("{}/home", server.uri())).await;
    assert_eq!(body, None);
}

#[tokio::test]
async fn connection_errors_degrade_to_none() {
    // Nothing is listening on this port once the server is dropped.
    let server = MockServer::start().await;
    let dead_url = format!("{}/home", server.uri());
    drop(server);

    let body = fast_client().fetch_text(&dead_url).await;
    assert_eq!(body, None);
}

#[tokio::test]
async fn backoff_between_attempts_is_linear() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>ok</h1>"))
        .mount(&server)
        .await;

    // Base scaled to 20ms: the waits are 20ms then 40ms, so a success on
    // the third attempt takes at least 60ms in backoff alone.
    let client = PageClient::new(Duration::from_secs(5), Duration::ZERO, "ofertas-test/0.1")
        .expect("failed to build test PageClient")
        .with_backoff_base(Duration::from_millis(20));

    let started = Instant::now();
    let body = client.fetch_text(&format!("{}/home", server.uri())).await;

    assert_eq!(body.as_deref(), Some("<h1>ok</h1>"));
    assert!(started.elapsed() >= Duration::from_millis(60));
}

#[tokio::test]
async fn rate_limit_spaces_out_consecutive_fetches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/home"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<h1>ofertas</h1>"))
        .mount(&server)
        .await;

    let client = PageClient::new(
        Duration::from_secs(5),
        Duration::from_millis(50),
        "ofertas-test/0.1",
    )
    .expect("failed to build test PageClient");
    let url = format!("{}/home", server.uri());

    let started = Instant::now();
    client.fetch_text(&url).await;
    client.fetch_text(&url).await;

    assert!(started.elapsed() >= Duration::from_millis(50));
}
