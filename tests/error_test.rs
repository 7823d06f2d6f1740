mod common;

use std::process::Command;

use serde_json::json;

use bruno_allure::ConvertError;
use common::{Factory, TestApp};

#[test]
fn test_missing_results_is_invalid_format() {
    let app = TestApp::new();
    let err = app.convert(&json!({})).unwrap_err();

    assert!(matches!(err, ConvertError::InvalidFormat));
    assert_eq!(err.to_string(), "Invalid Bruno report format");
    assert!(!app.output_dir.exists());
}

#[test]
fn test_empty_array_is_invalid_format() {
    let app = TestApp::new();
    let err = app.convert(&json!([])).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidFormat));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let app = TestApp::new();
    app.write_source("{\"results\": [");
    let err = app.converter().convert(&app.source).unwrap_err();
    assert!(matches!(err, ConvertError::Parse(_)));
}

#[test]
fn test_missing_source_is_io_error() {
    let app = TestApp::new();
    let err = app.converter().convert(&app.source).unwrap_err();
    match err {
        ConvertError::Io { path, .. } => assert_eq!(path, app.source),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_unwritable_output_is_io_error() {
    let app = TestApp::new();
    // a regular file where the output directory should be
    std::fs::write(&app.output_dir, "occupied").unwrap();

    let err = app
        .convert(&Factory::report(vec![Factory::get_user("pass", None)]))
        .unwrap_err();
    assert!(matches!(err, ConvertError::Io { .. }));
}

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_bruno-to-allure"));
    cmd.env_remove("BRUNO_ALLURE_OUTPUT_DIR")
        .env_remove("BRUNO_ALLURE_HONOR_STATUS")
        .env_remove("BRUNO_ALLURE_LOG_FORMAT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_success_prints_file_count() {
    let app = TestApp::new();
    app.write_source(&Factory::report(vec![Factory::get_user("pass", None)]).to_string());

    let output = bin()
        .arg(&app.source)
        .arg(&app.output_dir)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        format!("✅ Generated 6 files in {}", app.output_dir.display())
    );
}

#[test]
fn test_cli_invalid_report_exits_one() {
    let app = TestApp::new();
    app.write_source("{}");

    let output = bin()
        .arg(&app.source)
        .arg(&app.output_dir)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("❌ Error converting Bruno -> Allure"));
    assert!(stderr.contains("Invalid Bruno report format"));
    assert!(!app.output_dir.exists());
}

#[test]
fn test_cli_missing_file_exits_one() {
    let app = TestApp::new();
    let output = bin()
        .arg(app.tmp.path().join("nope.json"))
        .arg(&app.output_dir)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_invalid_log_format_env_exits_one() {
    let app = TestApp::new();
    app.write_source(&Factory::report(vec![Factory::get_user("pass", None)]).to_string());

    let output = bin()
        .env("BRUNO_ALLURE_LOG_FORMAT", "xml")
        .arg(&app.source)
        .arg(&app.output_dir)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid environment variable: BRUNO_ALLURE_LOG_FORMAT"));
    assert!(!app.output_dir.exists());
}

#[test]
fn test_cli_invalid_honor_status_env_exits_one() {
    let app = TestApp::new();
    app.write_source(&Factory::report(vec![Factory::get_user("pass", None)]).to_string());

    let output = bin()
        .env("BRUNO_ALLURE_HONOR_STATUS", "maybe")
        .arg(&app.source)
        .arg(&app.output_dir)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid environment variable: BRUNO_ALLURE_HONOR_STATUS"));
}

#[test]
fn test_cli_json_log_format_succeeds() {
    let app = TestApp::new();
    app.write_source(&Factory::report(vec![Factory::get_user("fail", Some("expected 200"))]).to_string());

    let output = bin()
        .arg("--log-format")
        .arg("json")
        .arg(&app.source)
        .arg(&app.output_dir)
        .env("RUST_LOG", "info")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("✅ Generated 6 files in"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().expect("expected log output");
    let line: serde_json::Value = serde_json::from_str(first).expect("log line is not JSON");
    assert!(line.get("level").is_some());
}
