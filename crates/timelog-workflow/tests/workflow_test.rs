/*
[INPUT]:  Scripted parser outcomes and fixture catalogs
[OUTPUT]: End-to-end checks of the four-step workflow
[POS]:    Integration tests - session driver over the state machine
[UPDATE]: When workflow rules or session bookkeeping change
*/

mod common;

use common::{JANE_LOG, api_path, fixture, jane_row, session_at_log_input};
use timelog_adapter::{MockParser, ParseRequest, ParserError};
use timelog_workflow::{
    Catalog, Step, TransitionError, WorkflowState, enumerate_leaf_paths, filter_tasks,
    to_delimited_text,
};
use tokio_test::assert_ok;

#[tokio::test]
async fn test_engineering_backend_api_end_to_end() {
    let parser = MockParser::new();
    parser.push_rows(vec![jane_row()]);

    let mut session = session_at_log_input();
    assert_ok!(session.submit(&parser, JANE_LOG).await);

    let state = session.state();
    assert_eq!(state.step, Step::Results);
    assert_eq!(state.result_rows, vec![jane_row()]);
    assert_eq!(state.raw_log_text.as_deref(), Some(JANE_LOG));
    assert_eq!(
        parser.requests(),
        vec![ParseRequest::new(JANE_LOG, "Engineering > Backend > API")]
    );

    let artifact = session.export_artifact().expect("artifact");
    assert_eq!(artifact.file_name, "time_log_export.csv");
    assert_eq!(
        String::from_utf8(artifact.bytes).expect("utf8"),
        to_delimited_text(&[jane_row()])
    );
}

#[tokio::test]
async fn test_reset_from_results_matches_initial_state() {
    let parser = MockParser::new();
    parser.push_response(timelog_adapter::ParseResponse {
        message: "Text parsed successfully.".to_string(),
        data: vec![jane_row()],
        errors: vec!["Could not parse line 2".to_string()],
    });

    let mut session = session_at_log_input();
    assert_ok!(session.submit(&parser, JANE_LOG).await);
    assert_eq!(session.state().parse_warnings.len(), 1);

    session.reset();
    assert_eq!(session.state(), &WorkflowState::initial());
    assert!(session.export_artifact().is_none());
}

#[test]
fn test_submit_while_pending_is_rejected_without_second_call() {
    let parser = MockParser::new();
    let mut session = session_at_log_input();

    let pending = session.begin_submit(JANE_LOG).expect("first submit");
    let second = session.begin_submit("another log");
    assert_eq!(second, Err(TransitionError::RequestPending));
    assert_eq!(parser.calls(), 0);
    assert_eq!(session.state().pending, Some(pending.request));
}

#[tokio::test]
async fn test_at_most_one_parser_invocation_per_submission() {
    let parser = MockParser::new();
    parser.push_rows(vec![jane_row()]);
    let mut session = session_at_log_input();

    let pending = session.begin_submit(JANE_LOG).expect("submit");
    assert!(session.submit(&parser, JANE_LOG).await.is_err());

    let outcome = timelog_adapter::RemoteParser::parse(&parser, pending.payload).await;
    assert_ok!(session.complete(pending.request, outcome));
    assert_eq!(parser.calls(), 1);
    assert_eq!(session.state().step, Step::Results);
}

#[tokio::test]
async fn test_response_after_reset_is_ignored() {
    let parser = MockParser::new();
    parser.push_rows(vec![jane_row()]);
    let mut session = session_at_log_input();

    let pending = session.begin_submit(JANE_LOG).expect("submit");
    session.reset();
    let outcome = timelog_adapter::RemoteParser::parse(&parser, pending.payload).await;

    assert_eq!(
        session.complete(pending.request, outcome),
        Err(TransitionError::StaleResponse(pending.request))
    );
    assert_eq!(session.state(), &WorkflowState::initial());

    // The next walk through the workflow is unaffected.
    session.select_project(1).expect("project");
    session.select_task(api_path()).expect("task");
    let next = session.begin_submit(JANE_LOG).expect("submit again");
    assert_ne!(next.request, pending.request);
}

#[tokio::test]
async fn test_failures_keep_log_input_and_report() {
    let parser = MockParser::new();
    parser.push_error(ParserError::Api {
        status: 400,
        detail: "Input text cannot be empty.".to_string(),
    });
    parser.push_error(ParserError::InvalidResponse("truncated body".to_string()));

    let mut session = session_at_log_input();
    assert_ok!(session.submit(&parser, "x").await);
    assert_eq!(session.state().step, Step::LogInput);
    assert_eq!(
        session.state().last_error.as_deref(),
        Some("Error: 400 - Input text cannot be empty.")
    );

    assert_ok!(session.submit(&parser, "y").await);
    assert_eq!(
        session.state().last_error.as_deref(),
        Some("An unexpected error occurred.")
    );
    assert_eq!(session.state().selected_task_path, Some(api_path()));
}

#[test]
fn test_fixture_catalogs_load_and_enumerate() {
    let json = Catalog::load(fixture("catalog.json")).expect("json fixture");
    let paths = enumerate_leaf_paths(json.tasks_for(1));
    assert_eq!(paths.len(), 7);
    assert_eq!(paths[0], api_path());

    let review: Vec<String> = enumerate_leaf_paths(&filter_tasks(json.tasks_for(2), "review"))
        .iter()
        .map(|path| path.joined())
        .collect();
    assert_eq!(review, vec!["Tickets > Review", "Escalations > Review"]);

    let yaml = Catalog::load(fixture("catalog.yaml")).expect("yaml fixture");
    assert_eq!(enumerate_leaf_paths(yaml.tasks_for(10)).len(), 3);

    assert!(Catalog::load(fixture("broken_catalog.json")).is_err());
}
