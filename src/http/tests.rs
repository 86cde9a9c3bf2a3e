//! Tests for the HTTP module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use reqwest::Method;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> HttpClient {
    let config = ClientConfig::new(server.uri(), "test-key");
    HttpClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_execute_attaches_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cuckoo/status"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let outcome = client.execute(Method::GET, "/cuckoo/status").await;

    assert!(matches!(outcome, ResponseOutcome::Success(_)));
}

#[tokio::test]
async fn test_execute_classifies_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/list/1/0"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let outcome = client.execute(Method::GET, "tasks/list/1/0").await;

    assert_eq!(outcome.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
    match outcome {
        ResponseOutcome::Unauthorized(response) => {
            assert_eq!(response.text().await.unwrap(), "bad key");
        }
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_execute_classifies_other_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/tasks/view/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let outcome = client.execute(Method::GET, "tasks/view/9").await;

    assert!(matches!(outcome, ResponseOutcome::Status(_)));
    assert_eq!(outcome.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_execute_classifies_transport_failure() {
    let uri = {
        let mock_server = MockServer::start().await;
        mock_server.uri()
    };

    let client = HttpClient::new(&ClientConfig::new(uri, "k")).unwrap();
    let outcome = client.execute(Method::GET, "cuckoo/status").await;

    assert!(matches!(outcome, ResponseOutcome::Transport(_)));
    assert!(outcome.status().is_none());
    assert!(matches!(outcome.into_success(), Err(Error::Http(_))));
}

#[tokio::test]
async fn test_execute_timeout_is_transport_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(100))
        .build();
    let client = HttpClient::new(&config).unwrap();

    match client.execute(Method::GET, "slow").await {
        ResponseOutcome::Transport(e) => assert!(e.is_timeout()),
        other => panic!("Expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn test_into_success_maps_statuses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/unauthorized"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let err = client.get("unauthorized").await.unwrap_err();
    assert!(err.is_not_authorized());

    let err = client.get("broken").await.unwrap_err();
    assert!(matches!(err, Error::BadStatus { status: 500 }));
    assert_eq!(err.to_string(), "bad response code: 500");
}

#[tokio::test]
async fn test_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cuckoo/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "2.0.7"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body: serde_json::Value = client.get_json("cuckoo/status").await.unwrap();

    assert_eq!(body["version"], "2.0.7");
}

#[tokio::test]
async fn test_get_json_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cuckoo/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get_json::<serde_json::Value>("cuckoo/status")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_base_url_trailing_slash_trimmed() {
    let client = HttpClient::new(&ClientConfig::new("http://sandbox:8090/", "k")).unwrap();
    assert_eq!(client.base_url(), "http://sandbox:8090");
    assert_eq!(client.build_url("/tasks/list/10/0"), "http://sandbox:8090/tasks/list/10/0");
    assert_eq!(client.build_url("exit"), "http://sandbox:8090/exit");
}

#[test]
fn test_debug_hides_api_key() {
    let client = HttpClient::new(&ClientConfig::new("http://sandbox:8090", "secret")).unwrap();
    let debug = format!("{client:?}");
    assert!(!debug.contains("secret"));
    assert!(debug.contains("has_api_key: true"));
}
