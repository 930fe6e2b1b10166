//! Integration tests for the reachability probe.
//!
//! A server is reachable only if a GET answers 200 within the two-second
//! probe timeout; everything else, including errors, reports `false`.

mod helpers;

use std::time::{Duration, Instant};

use helpers::{closed_port_url, session_for};
use remote_http_testing::{check_reachable, is_reachable, HttpTransport, RequestError, SessionConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with_status(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_200_is_reachable() {
    let server = server_with_status(200).await;
    assert!(is_reachable(&server.uri()).await);
}

#[tokio::test]
async fn test_404_and_500_are_unreachable() {
    for status in [404, 500] {
        let server = server_with_status(status).await;
        assert!(
            !is_reachable(&server.uri()).await,
            "status {status} should count as unreachable"
        );
    }
}

#[tokio::test]
async fn test_redirect_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/home"))
        .mount(&server)
        .await;
    assert!(!is_reachable(&format!("{}/", server.uri())).await);
}

#[tokio::test]
async fn test_slow_server_is_unreachable_within_bound() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let start = Instant::now();
    assert!(!is_reachable(&server.uri()).await);
    assert!(
        start.elapsed() < Duration::from_secs(4),
        "probe took {:.2}s, expected to give up after ~2s",
        start.elapsed().as_secs_f64()
    );
}

#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    assert!(!is_reachable(&closed_port_url()).await);
}

#[tokio::test]
async fn test_check_reachable_reports_display_name() {
    let dead = closed_port_url();
    let transport = HttpTransport::new(&SessionConfig::default()).expect("client builds");
    let err = check_reachable(&transport, &dead, Some("Billing API"), &[])
        .await
        .expect_err("nothing listens there");
    assert!(matches!(err, RequestError::Unreachable(_)));
    assert_eq!(
        err.to_string(),
        format!("Unable to connect to Billing API at {dead}")
    );
}

#[tokio::test]
async fn test_session_probe_sends_session_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("x-suite", "smoke"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    let health = format!("{}/health", server.uri());
    assert!(!session.server_reachable(&health).await);
    session.add_header("X-Suite", "smoke");
    assert!(session.server_reachable(&health).await);
}
