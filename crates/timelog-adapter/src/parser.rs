/*
[INPUT]:  Parse requests (raw text + joined task path)
[OUTPUT]: Parse responses or ParserError
[POS]:    Parser seam - abstraction over the remote parsing service
[UPDATE]: When adding parser backends or changing the parse contract
*/

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::http::{ParserClient, ParserError, Result};
use crate::types::{ParseRequest, ParseResponse, ResultRow};

/// Trait for remote time-log parsing
///
/// The HTTP client implements it; callers that only need the parse contract
/// (the workflow session, tests) depend on this trait instead of the client.
#[async_trait]
pub trait RemoteParser: Send + Sync {
    /// Parse raw text for the given task path
    async fn parse(&self, request: ParseRequest) -> Result<ParseResponse>;
}

#[async_trait]
impl RemoteParser for ParserClient {
    async fn parse(&self, request: ParseRequest) -> Result<ParseResponse> {
        self.parse_text(&request).await
    }
}

/// Scripted parser for testing
///
/// Replays queued outcomes in order and records every request it receives.
#[derive(Debug, Default)]
pub struct MockParser {
    outcomes: Mutex<VecDeque<Result<ParseResponse>>>,
    requests: Mutex<Vec<ParseRequest>>,
}

impl MockParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response carrying `rows`
    pub fn push_rows(&self, rows: Vec<ResultRow>) {
        self.push_response(ParseResponse {
            message: "Text parsed successfully.".to_string(),
            data: rows,
            errors: Vec::new(),
        });
    }

    /// Queue a full successful response
    pub fn push_response(&self, response: ParseResponse) {
        self.lock_outcomes().push_back(Ok(response));
    }

    /// Queue a failure
    pub fn push_error(&self, error: ParserError) {
        self.lock_outcomes().push_back(Err(error));
    }

    /// Number of parse invocations so far
    pub fn calls(&self) -> usize {
        self.lock_requests().len()
    }

    /// Requests received so far, in order
    pub fn requests(&self) -> Vec<ParseRequest> {
        self.lock_requests().clone()
    }

    fn lock_outcomes(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<ParseResponse>>> {
        self.outcomes.lock().expect("mock parser outcomes lock")
    }

    fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<ParseRequest>> {
        self.requests.lock().expect("mock parser requests lock")
    }
}

#[async_trait]
impl RemoteParser for MockParser {
    async fn parse(&self, request: ParseRequest) -> Result<ParseResponse> {
        self.lock_requests().push(request);
        self.lock_outcomes().pop_front().unwrap_or_else(|| {
            Err(ParserError::InvalidResponse(
                "no scripted response left".to_string(),
            ))
        })
    }
}
