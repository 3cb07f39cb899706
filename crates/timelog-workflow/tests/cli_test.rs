/*
[INPUT]:  The timelog binary, fixture catalogs, and a mock parsing service
[OUTPUT]: Exit status and output checks for the non-interactive commands
[POS]:    Integration tests - CLI mode
[UPDATE]: When subcommands or their output change
*/

mod common;

use std::process::{Command, Output};

use common::{fixture, setup_mock_server};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn timelog(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_timelog"))
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to start timelog binary")
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn check_offline_validates_catalog() {
    let catalog = fixture("catalog.json");
    let output = timelog(&["check", "--offline", "--catalog", catalog.to_str().expect("utf-8")]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 projects"), "stdout: {stdout}");
    assert!(stdout.contains("10 selectable tasks"), "stdout: {stdout}");
}

#[test]
fn check_offline_reads_config_file() {
    let config = fixture("config.yaml");
    let output = Command::new(env!("CARGO_BIN_EXE_timelog"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["--config", config.to_str().expect("utf-8"), "check", "--offline"])
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to start timelog binary");
    assert_success(&output);
}

#[test]
fn paths_prints_filtered_leaf_paths() {
    let catalog = fixture("catalog.json");
    let output = timelog(&[
        "--catalog",
        catalog.to_str().expect("utf-8"),
        "paths",
        "--project",
        "1",
        "--filter",
        "api",
    ]);
    assert_success(&output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["Engineering > Backend > API", "Operations > API review"]);
}

#[test]
fn projects_lists_catalog_entries() {
    let catalog = fixture("catalog.yaml");
    let output = timelog(&["projects", "--catalog", catalog.to_str().expect("utf-8")]);
    assert_success(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("Research"));
}

#[test]
fn broken_catalog_exits_non_zero() {
    let catalog = fixture("broken_catalog.json");
    let output = timelog(&["check", "--offline", "--catalog", catalog.to_str().expect("utf-8")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate project id 1"));

    let output = timelog(&["projects", "--catalog", "/definitely/missing.json"]);
    assert!(!output.status.success());
}

#[tokio::test]
async fn run_parses_and_exports_against_mock_parser() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/parse-text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Text parsed successfully.",
            "data": [{
                "Employee": "Jane",
                "Date": "1 May 2025",
                "Time": "9:00-10:00",
                "Description": "Fix \"the\" bug",
                "Subtask": "API"
            }],
            "errors": ["Skipped an empty line"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog = fixture("catalog.json");
    let input = fixture("time_log.txt");
    let export_dir = tempfile::tempdir().expect("tempdir");
    let uri = server.uri();
    let args = vec![
        "--catalog".to_string(),
        catalog.display().to_string(),
        "--parser-url".to_string(),
        uri,
        "run".to_string(),
        "--project".to_string(),
        "1".to_string(),
        "--task".to_string(),
        "Engineering > Backend > API".to_string(),
        "--input".to_string(),
        input.display().to_string(),
        "--export-dir".to_string(),
        export_dir.path().display().to_string(),
        "--csv".to_string(),
    ];

    // The binary blocks on its own runtime; keep the mock server's runtime free.
    let output = tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_timelog"))
            .args(&args)
            .env("RUST_LOG", "error")
            .output()
            .expect("Failed to start timelog binary")
    })
    .await
    .expect("join");
    assert_success(&output);

    let expected = "Employee,Date,Time,Description,Subtask\nJane,1 May 2025,9:00-10:00,\"Fix \"\"the\"\" bug\",\"API\"";
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), expected);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Skipped an empty line"));

    let written = std::fs::read_to_string(export_dir.path().join("time_log_export.csv"))
        .expect("export file");
    assert_eq!(written, expected);
}

#[tokio::test]
async fn run_reports_rejection_and_fails() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/parse-text"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "detail": "Input text cannot be empty."
        })))
        .mount(&server)
        .await;

    let catalog = fixture("catalog.json");
    let input = fixture("time_log.txt");
    let uri = server.uri();
    let args = vec![
        "--catalog".to_string(),
        catalog.display().to_string(),
        "--parser-url".to_string(),
        uri,
        "run".to_string(),
        "--project".to_string(),
        "1".to_string(),
        "--task".to_string(),
        "Meetings".to_string(),
        "--input".to_string(),
        input.display().to_string(),
    ];

    let output = tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_timelog"))
            .args(&args)
            .env("RUST_LOG", "error")
            .output()
            .expect("Failed to start timelog binary")
    })
    .await
    .expect("join");

    assert!(!output.status.success());
    assert!(
        String::from_utf8_lossy(&output.stderr).contains("Error: 400 - Input text cannot be empty.")
    );
}

#[tokio::test]
async fn run_skips_export_when_no_rows_parsed() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/parse-text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Text parsed successfully.",
            "data": [],
            "errors": []
        })))
        .mount(&server)
        .await;

    let catalog = fixture("catalog.json");
    let input = fixture("time_log.txt");
    let export_dir = tempfile::tempdir().expect("tempdir");
    let uri = server.uri();
    let args = vec![
        "--catalog".to_string(),
        catalog.display().to_string(),
        "--parser-url".to_string(),
        uri,
        "run".to_string(),
        "--project".to_string(),
        "1".to_string(),
        "--task".to_string(),
        "Meetings".to_string(),
        "--input".to_string(),
        input.display().to_string(),
        "--export-dir".to_string(),
        export_dir.path().display().to_string(),
    ];

    let output = tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_timelog"))
            .args(&args)
            .env("RUST_LOG", "error")
            .output()
            .expect("Failed to start timelog binary")
    })
    .await
    .expect("join");
    assert_success(&output);

    assert!(String::from_utf8_lossy(&output.stderr).contains("no rows to export"));
    assert!(!export_dir.path().join("time_log_export.csv").exists());
}
