//! Fetcher retry behavior against a scripted local server.

mod common;

use std::collections::HashMap;
use std::time::Duration;

use colligo_core::{ColligoError, FetchConfig, build_client, fetch_url, parse_seed_url};
use common::{CannedResponse, TestServer};

fn fast_config() -> FetchConfig {
    FetchConfig { retry_base_delay: Duration::from_millis(10), ..Default::default() }
}

#[tokio::test]
async fn test_two_transient_failures_then_success() {
    let mut routes = HashMap::new();
    routes.insert(
        "/flaky".to_string(),
        vec![
            CannedResponse::status(503),
            CannedResponse::status(503),
            CannedResponse::ok("<html><body><p>recovered</p></body></html>"),
        ],
    );
    let server = TestServer::start(routes).await;

    let config = fast_config();
    let client = build_client(&config).unwrap();
    let url = parse_seed_url(&server.url("/flaky")).unwrap();

    let page = fetch_url(&client, &url, &config).await.unwrap();
    assert_eq!(page.attempts, 3);
    assert_eq!(page.status, 200);
    assert!(page.body.contains("recovered"));
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn test_retries_exhausted_is_terminal() {
    let mut routes = HashMap::new();
    routes.insert("/down".to_string(), vec![CannedResponse::status(500)]);
    let server = TestServer::start(routes).await;

    let config = fast_config();
    let client = build_client(&config).unwrap();
    let url = parse_seed_url(&server.url("/down")).unwrap();

    let result = fetch_url(&client, &url, &config).await;
    assert!(matches!(result, Err(ColligoError::HttpStatus { status: 500, attempts: 4 })));
    // 1 initial attempt + MAX_RETRIES
    assert_eq!(server.requests().len(), 4);
}

#[tokio::test]
async fn test_plain_404_fails_without_retry() {
    let mut routes = HashMap::new();
    routes.insert("/missing".to_string(), vec![CannedResponse::status(404)]);
    let server = TestServer::start(routes).await;

    let config = fast_config();
    let client = build_client(&config).unwrap();
    let url = parse_seed_url(&server.url("/missing")).unwrap();

    let result = fetch_url(&client, &url, &config).await;
    assert!(matches!(result, Err(ColligoError::HttpStatus { status: 404, attempts: 1 })));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_429_is_retried() {
    let mut routes = HashMap::new();
    routes.insert(
        "/limited".to_string(),
        vec![CannedResponse::status(429), CannedResponse::ok("<p>ok now</p>")],
    );
    let server = TestServer::start(routes).await;

    let config = fast_config();
    let client = build_client(&config).unwrap();
    let url = parse_seed_url(&server.url("/limited")).unwrap();

    let page = fetch_url(&client, &url, &config).await.unwrap();
    assert_eq!(page.attempts, 2);
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_connection_refused_after_retries() {
    // Bind then immediately drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = FetchConfig { max_retries: 1, retry_base_delay: Duration::from_millis(10), ..Default::default() };
    let client = build_client(&config).unwrap();
    let url = parse_seed_url(&format!("http://{}/page", addr)).unwrap();

    let result = fetch_url(&client, &url, &config).await;
    assert!(matches!(result, Err(ColligoError::Http(_))));
}
