/*
[INPUT]:  Raw time-log text and the selected task path
[OUTPUT]: Structured result rows and parser warnings
[POS]:    HTTP layer - parsing service endpoints (no auth required)
[UPDATE]: When adding new endpoints or changing response format
*/

use crate::http::{ParserClient, Result};
use crate::types::{HealthResponse, ParseRequest, ParseResponse};
use reqwest::Method;

impl ParserClient {
    /// Parse free-form time-log text
    ///
    /// POST /api/v1/parse-text
    pub async fn parse_text(&self, request: &ParseRequest) -> Result<ParseResponse> {
        tracing::debug!(
            text_len = request.text.len(),
            task_path = %request.task_path,
            "sending parse request"
        );
        let builder = self
            .request(Method::POST, "/api/v1/parse-text")?
            .json(request);
        let response: ParseResponse = self.send_json(builder).await?;
        tracing::debug!(
            rows = response.data.len(),
            warnings = response.errors.len(),
            "parse request completed"
        );
        Ok(response)
    }

    /// Probe the service root
    ///
    /// GET /
    pub async fn health(&self) -> Result<HealthResponse> {
        let builder = self.request(Method::GET, "/")?;
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, ParserClient, ParserError};
    use crate::types::{ParseRequest, ResultRow};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ParserClient {
        ParserClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
    }

    #[tokio::test]
    async fn test_parse_text() {
        let server = MockServer::start().await;
        let mock_response = r#"{
            "message": "Text parsed successfully.",
            "data": [
                {
                    "Employee": "Jane",
                    "Date": "1 May 2025",
                    "Time": "9:00-10:00",
                    "Description": "Fix bug",
                    "Subtask": "API"
                }
            ],
            "errors": []
        }"#;

        let _mock = Mock::given(method("POST"))
            .and(path("/api/v1/parse-text"))
            .and(body_json(serde_json::json!({
                "text": "Jane, 1 May 2025, 9:00-10:00, Fix bug",
                "task_path": "Engineering > Backend > API",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_raw(mock_response, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let request = ParseRequest::new(
            "Jane, 1 May 2025, 9:00-10:00, Fix bug",
            "Engineering > Backend > API",
        );
        let response = client_for(&server)
            .parse_text(&request)
            .await
            .expect("parse_text failed");

        assert_eq!(response.message, "Text parsed successfully.");
        assert_eq!(
            response.data,
            vec![ResultRow {
                employee: "Jane".to_string(),
                date: "1 May 2025".to_string(),
                time: "9:00-10:00".to_string(),
                description: "Fix bug".to_string(),
                subtask: "API".to_string(),
            }]
        );
        assert!(response.errors.is_empty());
    }

    #[tokio::test]
    async fn test_parse_text_rejected() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/v1/parse-text"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "detail": "Input text cannot be empty."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .parse_text(&ParseRequest::new(" ", ""))
            .await
            .expect_err("expected rejection");

        match err {
            ParserError::Api { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "Input text cannot be empty.");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_parse_text_malformed_body() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/api/v1/parse-text"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .parse_text(&ParseRequest::new("text", ""))
            .await
            .expect_err("expected decode failure");

        assert!(err.is_transport_failure(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Welcome to the PDM Hour Logging API!"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).health().await.expect("health failed");
        assert_eq!(response.message, "Welcome to the PDM Hour Logging API!");
    }
}
