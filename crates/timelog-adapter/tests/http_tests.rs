/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for HTTP client
[POS]:    Integration tests - HTTP endpoints
[UPDATE]: When HTTP endpoints change
*/

mod common;

use std::time::Duration;

use common::{client_for, parse_success_body, setup_mock_server};
use timelog_adapter::{
    ClientConfig, ParseRequest, ParserClient, ParserError, RemoteParser, ResultRow,
};
use tokio_test::assert_ok;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = assert_ok!(ParserClient::new());
    assert_eq!(client.base_url().as_str(), "http://localhost:8001/");
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig {
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(1),
    };
    let _client = assert_ok!(ParserClient::with_config(config, "http://127.0.0.1:8001"));
}

#[tokio::test]
async fn test_remote_parser_trait_over_http() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/parse-text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(parse_success_body(
            serde_json::json!([
                {"Employee": "John Doe", "Date": "1 April, 2025", "Time": "9:00-12:00",
                 "Description": "Test Task", "Subtask": null},
                {"Employee": "John Doe", "Date": "1 April, 2025", "Time": "13:00-14:00",
                 "Description": "Write \"notes\"", "Subtask": "Docs"}
            ]),
            serde_json::json!(["Invalid end time '25:00': Hour out of range: 25"]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let parser: Box<dyn RemoteParser> = Box::new(client_for(&server));
    let response = assert_ok!(
        parser
            .parse(ParseRequest::new("John Doe\n1 April, 2025\n9:00 - 12:00 Test Task", ""))
            .await
    );

    assert_eq!(response.data.len(), 2);
    assert_eq!(
        response.data[0],
        ResultRow::new("John Doe", "1 April, 2025", "9:00-12:00", "Test Task", "")
    );
    assert_eq!(response.data[1].description, "Write \"notes\"");
    assert_eq!(response.errors.len(), 1);
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/parse-text"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .parse_text(&ParseRequest::new("text", ""))
        .await
        .expect_err("expected API error");

    assert!(err.is_remote_rejection());
    match err {
        ParserError::Api { status, detail } => {
            assert_eq!(status, 503);
            assert_eq!(detail, "Service Unavailable");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() {
    let server = setup_mock_server().await;
    let uri = server.uri();
    drop(server);

    let client = assert_ok!(ParserClient::with_config(
        ClientConfig {
            timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(1),
        },
        &uri,
    ));
    let err = client
        .parse_text(&ParseRequest::new("text", ""))
        .await
        .expect_err("expected transport failure");

    assert!(matches!(err, ParserError::Http(_)), "unexpected error: {err:?}");
    assert!(err.is_transport_failure());
    assert!(!err.is_remote_rejection());
}

#[tokio::test]
async fn test_empty_success_body_is_invalid_response() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/parse-text"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .parse_text(&ParseRequest::new("text", ""))
        .await
        .expect_err("expected invalid response");

    assert!(matches!(err, ParserError::InvalidResponse(_)));
}
