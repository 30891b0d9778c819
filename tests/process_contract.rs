//! The binary's stdin/stdout/exit-status contract.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_binary(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ledger-forecast"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let text = String::from_utf8(output.stdout.clone()).unwrap();
    assert_eq!(text.lines().count(), 1, "expected one document, got {text:?}");
    serde_json::from_str(&text).unwrap()
}

#[test]
fn success_exits_zero() {
    let output = run_binary(
        &[],
        r#"{"type": "exception_resolution",
            "data": [{"date": "2024-01-05", "status": "RESOLVED"},
                     {"date": "2024-01-20", "status": "PENDING"},
                     {"date": "2024-02-10", "status": "RESOLVED"}]}"#,
    );
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["success"], true);
}

#[test]
fn pretty_output_is_one_indented_document() {
    let output = run_binary(&["--pretty"], r#"{"type": "bank_transactions", "data": []}"#);
    assert!(!output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.lines().count() > 1);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["success"], false);
}

#[test]
fn failure_response_exits_non_zero() {
    let output = run_binary(&[], r#"{"type": "bank_transactions", "data": []}"#);
    assert!(!output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["success"], false);
    assert!(value["error"].is_string());
}

#[test]
fn garbage_input_exits_non_zero_with_a_document() {
    let output = run_binary(&[], "{{{");
    assert!(!output.status.success());
    assert_eq!(stdout_json(&output)["success"], false);
}

#[test]
fn demo_prints_a_request() {
    let output = run_binary(
        &["demo", "--kind", "exception_resolution", "--end", "2024-06-30"],
        "",
    );
    assert!(output.status.success());
    let request = stdout_json(&output);
    assert_eq!(request["type"], "exception_resolution");
    assert!(request["data"].as_array().unwrap().len() >= 90);
}

#[test]
fn demo_run_prints_a_response() {
    let output = run_binary(&["demo", "--end", "2024-06-30", "--run"], "");
    assert!(output.status.success());
    let response = stdout_json(&output);
    assert_eq!(response["success"], true);
    assert_eq!(response["forecast"]["dates"][0], "2024-07-01");
}
