//! End-to-end tests for the hookrule binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CONFIG: &str = r#"
PreToolUse:
  - matcher: Bash
    conditions:
      - type: command_starts_with
        value: "rm "
    actions:
      - type: output
        decision: deny
        reason: "refusing to delete {tool_input.command}"

UserPromptSubmit:
  - conditions:
      - type: prompt_regex
        value: "^deploy"
    actions:
      - type: output
        message: "deployments are frozen"
        exit_status: 2

Stop:
  - actions:
      - type: output
        message: "all done"
        exit_status: 0
"#;

fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

fn hookrule(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hookrule").unwrap();
    cmd.env_remove("HOOKRULE_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

fn pre_tool_use(command: &str) -> String {
    serde_json::json!({
        "session_id": "s1",
        "transcript_path": "/tmp/transcript.jsonl",
        "cwd": "/tmp",
        "hook_event_name": "PreToolUse",
        "tool_name": "Bash",
        "tool_input": { "command": command }
    })
    .to_string()
}

fn prompt(text: &str) -> String {
    serde_json::json!({
        "session_id": "s1",
        "transcript_path": "/tmp/transcript.jsonl",
        "cwd": "/tmp",
        "hook_event_name": "UserPromptSubmit",
        "prompt": text
    })
    .to_string()
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be one JSON document")
}

#[test]
fn test_deny_is_written_as_json() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let output = hookrule(&config)
        .write_stdin(pre_tool_use("rm -rf build"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = stdout_json(&output);
    let specific = &value["hookSpecificOutput"];
    assert_eq!(specific["hookEventName"], "PreToolUse");
    assert_eq!(specific["permissionDecision"], "deny");
    assert_eq!(
        specific["permissionDecisionReason"],
        "refusing to delete rm -rf build"
    );
}

#[test]
fn test_unmatched_event_allows() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let output = hookrule(&config)
        .write_stdin(pre_tool_use("ls -la"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["continue"], true);
    assert_eq!(value["hookSpecificOutput"]["permissionDecision"], "allow");
}

#[test]
fn test_output_ends_with_newline() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    hookrule(&config)
        .write_stdin(pre_tool_use("ls"))
        .assert()
        .success()
        .stdout(predicate::str::ends_with("}\n"));
}

#[test]
fn test_invalid_json_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    hookrule(&config)
        .write_stdin("{not json")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error: JSON error"));
}

#[test]
fn test_empty_stdin_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    hookrule(&config)
        .write_stdin("")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_event_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    hookrule(&config)
        .write_stdin(r#"{"session_id":"s","transcript_path":"/t","cwd":"/","hook_event_name":"Bogus"}"#)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_broken_config_exits_with_failure() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "PreToolUse: [unclosed");

    hookrule(&config)
        .write_stdin(pre_tool_use("ls"))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn test_legacy_exit_status_writes_message_to_stderr() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    hookrule(&config)
        .write_stdin(prompt("deploy to prod"))
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("deployments are frozen"));
}

#[test]
fn test_legacy_exit_zero_writes_message_to_stdout() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    hookrule(&config)
        .write_stdin(r#"{"session_id":"s","transcript_path":"/t","cwd":"/","hook_event_name":"Stop"}"#)
        .assert()
        .code(0)
        .stdout("all done\n");
}

#[test]
fn test_prompt_without_match_continues() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let output = hookrule(&config)
        .write_stdin(prompt("please review"))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output), serde_json::json!({ "continue": true }));
}

#[test]
fn test_event_flag_rejects_other_kinds() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    hookrule(&config)
        .args(["--event", "Stop"])
        .write_stdin(pre_tool_use("ls"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected Stop, got PreToolUse"));
}

#[test]
fn test_event_flag_accepts_matching_kind() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    hookrule(&config)
        .args(["--event", "PreToolUse"])
        .write_stdin(pre_tool_use("ls"))
        .assert()
        .success();
}

#[test]
fn test_missing_default_config_means_no_rules() {
    let home = TempDir::new().unwrap();

    let output = Command::cargo_bin("hookrule")
        .unwrap()
        .env_remove("HOOKRULE_CONFIG")
        .env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .write_stdin(pre_tool_use("rm -rf /"))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["hookSpecificOutput"]["permissionDecision"],
        "allow"
    );
}

#[test]
fn test_config_from_environment() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let output = Command::cargo_bin("hookrule")
        .unwrap()
        .env("HOOKRULE_CONFIG", &config)
        .write_stdin(pre_tool_use("rm foo"))
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["hookSpecificOutput"]["permissionDecision"],
        "deny"
    );
}

#[test]
fn test_check_clean_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    hookrule(&config)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 3 rule(s)"));
}

#[test]
fn test_check_reports_issues() {
    let dir = TempDir::new().unwrap();
    let config = write_config(
        dir.path(),
        r#"
Stop:
  - conditions:
      - type: command_contains
        value: "rm"
    actions:
      - type: command
        command: ""
"#,
    );

    hookrule(&config)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Stop rule #0: condition 'command_contains' is not handled for Stop",
        ));
}

#[test]
fn test_debug_logs_go_to_stderr() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let output = hookrule(&config)
        .arg("--debug")
        .write_stdin(pre_tool_use("ls"))
        .output()
        .unwrap();

    assert!(output.status.success());
    stdout_json(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("DEBUG"));
}
