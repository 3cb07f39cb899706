/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for timelog-adapter tests

use timelog_adapter::{ClientConfig, ParserClient};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> ParserClient {
    ParserClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
}

/// Success body in the shape the parsing service returns
pub fn parse_success_body(rows: serde_json::Value, errors: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "message": "Text parsed successfully.",
        "data": rows,
        "errors": errors,
    })
}
