/*
[INPUT]:  Fixture files and mock parser requirements
[OUTPUT]: Shared catalogs, sessions, and mock server helpers
[POS]:    Test infrastructure - shared across workflow integration tests
[UPDATE]: When adding new fixtures or test helpers
*/

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use timelog_adapter::{ClientConfig, ParserClient, ResultRow};
use timelog_workflow::{Catalog, Project, Session, Task, TaskPath};
use wiremock::MockServer;

pub const JANE_LOG: &str = "Jane, 1 May 2025, 9:00-10:00, Fix bug";

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// One project whose only leaf is `Engineering > Backend > API`
pub fn engineering_catalog() -> Arc<Catalog> {
    let catalog = Catalog::new(vec![Project {
        id: 1,
        name: "Platform".to_string(),
        description: "Core platform engineering".to_string(),
        tasks: vec![Task::branch(
            "Engineering",
            vec![Task::branch("Backend", vec![Task::leaf("API")])],
        )],
    }])
    .expect("catalog");
    Arc::new(catalog)
}

pub fn api_path() -> TaskPath {
    TaskPath::new(["Engineering", "Backend", "API"])
}

/// Session already standing on the text entry step
pub fn session_at_log_input() -> Session {
    let mut session = Session::new(engineering_catalog());
    session.select_project(1).expect("select project");
    session.select_task(api_path()).expect("select task");
    session
}

pub fn jane_row() -> ResultRow {
    ResultRow::new("Jane", "1 May 2025", "9:00-10:00", "Fix bug", "API")
}

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn client_for(server: &MockServer) -> ParserClient {
    ParserClient::with_config(ClientConfig::default(), &server.uri()).expect("client init")
}
