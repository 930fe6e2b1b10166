//! Integration tests for session verb calls against a mock remote server.
//!
//! These tests verify:
//! - Status, body and headers land in `last_response`
//! - Query params, bodies and extra headers reach the server
//! - Failures clear the previous response

mod helpers;

use helpers::{closed_port_url, session_for};
use remote_http_testing::{RequestBody, RequestError};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_json_index() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(r#"[{"id": 222932599931285505}]"#),
        )
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    let response = session.get("/index.json", &[]).await.expect("request succeeds");
    assert_eq!(response.status_code, 200);

    let json = session.json_response().expect("body is JSON");
    assert_eq!(json[0]["id"].as_u64(), Some(222932599931285505));
}

#[tokio::test]
async fn test_get_html_body_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-powered-by", "mock")
                .set_body_raw(
                    "<html><body><div id=\"container\"><p>a</p></div></body></html>",
                    "text/html; charset=utf-8",
                ),
        )
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    session.get("/index.html", &[]).await.expect("request succeeds");

    let response = session.response().expect("response stored");
    assert!(response.is_success());
    assert!(response.body_contains("id=\"container\""));
    assert_eq!(response.header("X-Powered-By"), Some("mock"));
    assert!(response
        .content_type()
        .is_some_and(|ct| ct.starts_with("text/html")));
    assert_eq!(response.url, format!("{}/index.html", server.uri()));
}

#[tokio::test]
async fn test_error_statuses_are_responses_not_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    let response = session.get("/missing", &[]).await.expect("404 is still a response");
    assert_eq!(response.status_code, 404);
    assert_eq!(response.body, "not here");
}

#[tokio::test]
async fn test_latin1_charset_is_honoured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(vec![b'c', b'a', b'f', 0xE9], "text/html; charset=ISO-8859-1"),
        )
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    let response = session.get("/latin1", &[]).await.expect("request succeeds");
    assert_eq!(response.body, "café");
}

#[tokio::test]
async fn test_query_params_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "rust & tests"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("found"))
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    let response = session
        .get("/search", &[("q", "rust & tests"), ("page", "2")])
        .await
        .expect("request succeeds");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "found");
}

#[tokio::test]
async fn test_post_raw_body_with_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(query_param("session", "s1"))
        .and(body_string(r#"{"name":"widget"}"#))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    let response = session
        .post("/items", &[("session", "s1")], r#"{"name":"widget"}"#)
        .await
        .expect("request succeeds");
    assert_eq!(response.status_code, 201);
}

#[tokio::test]
async fn test_put_form_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/items/1"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("name=Jane+Doe&qty=3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    let response = session
        .put(
            "/items/1",
            &[],
            RequestBody::form(&[("name", "Jane Doe"), ("qty", "3")]),
        )
        .await
        .expect("request succeeds");
    assert_eq!(response.status_code, 204);
}

#[tokio::test]
async fn test_patch_and_delete_methods() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/items/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("patched"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/items/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    let patched = session
        .patch("/items/1", &[], "qty=4")
        .await
        .expect("patch succeeds")
        .body
        .clone();
    assert_eq!(patched, "patched");
    let deleted = session
        .delete("/items/1", &[])
        .await
        .expect("delete succeeds")
        .body
        .clone();
    assert_eq!(deleted, "deleted");
}

#[tokio::test]
async fn test_extra_headers_reach_server_without_dedup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    session.add_header("X-Token", "a");
    session.add_header("X-Token", "b");
    session.get("/private", &[]).await.expect("request succeeds");

    let received = server.received_requests().await.expect("recording enabled");
    let values: Vec<String> = received[0]
        .headers
        .get_all("x-token")
        .iter()
        .map(|v| v.to_str().expect("ascii header").to_string())
        .collect();
    assert_eq!(values, ["a", "b"]);
}

#[tokio::test]
async fn test_temporary_server_receives_requests() {
    let primary = MockServer::start().await;
    let secondary = MockServer::start().await;
    for (server, body) in [(&primary, "primary"), (&secondary, "secondary")] {
        Mock::given(method("GET"))
            .and(path("/who"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    let mut session = session_for(&primary.uri());
    {
        let mut guard = session.use_server(secondary.uri());
        let body = guard.get("/who", &[]).await.expect("request succeeds").body.clone();
        assert_eq!(body, "secondary");
    }
    let body = session.get("/who", &[]).await.expect("request succeeds").body.clone();
    assert_eq!(body, "primary");
}

#[tokio::test]
async fn test_connection_refused_clears_last_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let mut session = session_for(&server.uri());
    session.get("/", &[]).await.expect("first request succeeds");
    assert!(session.last_response().is_some());

    let dead = closed_port_url();
    let err = {
        let mut guard = session.use_server(dead.clone());
        guard.get("/", &[]).await.expect_err("nothing listens there")
    };
    match err {
        RequestError::Connection { server, .. } => assert_eq!(server, dead),
        other => panic!("expected connection error, got {:?}", other),
    }
    assert!(session.last_response().is_none());
    assert!(session.last_request().is_some());
}
