//! End-to-end dispatch behavior: rules from YAML, event in, output out.


use hookrule_common::EventKind;
use serde_json::json;
use test_helpers::{dispatch_json, dispatcher, transcript_with_prompts, EventBuilder};

// ============================================================================
// Continuation
// ============================================================================

#[test]
fn test_non_blocking_kinds_always_continue() {
    let d = dispatcher(
        r#"
Notification:
  - actions:
      - type: output
        message: note
        continue: false
      - type: command
        command: "exit 9"
SessionEnd:
  - actions:
      - type: output
        message: ""
PreCompact:
  - actions:
      - type: output
        decision: block
SessionStart:
  - actions:
      - type: command
        command: "echo nope >&2; exit 1"
SubagentStart:
  - conditions:
      - type: bogus_condition
    actions:
      - type: output
        message: x
"#,
    );

    for kind in [
        EventKind::Notification,
        EventKind::SessionEnd,
        EventKind::PreCompact,
        EventKind::SessionStart,
        EventKind::SubagentStart,
    ] {
        let event = EventBuilder::new(kind.as_str()).event();
        let value = dispatch_json(&d, &event);
        assert_eq!(value["continue"], true, "{} must continue: {}", kind, value);
        assert!(value.get("decision").is_none(), "{} has no decision", kind);
    }
}

#[test]
fn test_blocking_kinds_default_to_non_blocking_value() {
    let d = dispatcher("");
    let pre = dispatch_json(&d, &EventBuilder::bash("ls").event());
    assert_eq!(pre["continue"], true);
    assert_eq!(pre["hookSpecificOutput"]["permissionDecision"], "allow");

    let stop = dispatch_json(&d, &EventBuilder::new("Stop").event());
    assert_eq!(stop, json!({"continue": true}));
}

// ============================================================================
// Text accumulation and templates
// ============================================================================

#[test]
fn test_three_messages_concatenate() {
    let d = dispatcher(
        r#"
PostToolUse:
  - actions:
      - type: output
        message: A
  - actions:
      - type: output
        message: B
      - type: output
        message: C
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::write("main.go").event());
    assert_eq!(value["hookSpecificOutput"]["additionalContext"], "A\nB\nC");
}

#[test]
fn test_template_miss_is_left_verbatim() {
    let d = dispatcher(
        r#"
PostToolUse:
  - actions:
      - type: output
        message: "value={missing.path}"
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::write("main.go").event());
    assert_eq!(
        value["hookSpecificOutput"]["additionalContext"],
        "value={missing.path}"
    );
}

#[test]
fn test_formatted_go_file_scenario() {
    let d = dispatcher(
        r#"
PostToolUse:
  - matcher: "Write|Edit"
    conditions:
      - type: file_extension
        value: ".go"
    actions:
      - type: output
        message: "Formatted {tool_input.file_path}"
"#,
    );
    let go = dispatch_json(&d, &EventBuilder::write("main.go").event());
    assert_eq!(go["hookSpecificOutput"]["additionalContext"], "Formatted main.go");

    let rs = dispatch_json(&d, &EventBuilder::write("main.rs").event());
    assert_eq!(rs, json!({"continue": true}));
}

// ============================================================================
// Decisions
// ============================================================================

#[test]
fn test_allow_branch_fields_cleared_by_deny() {
    let d = dispatcher(
        r#"
PermissionRequest:
  - actions:
      - type: output
        behavior: allow
        updated_input:
          command: "ls -la"
  - actions:
      - type: output
        behavior: deny
        message: "not today"
"#,
    );
    let event = EventBuilder::new("PermissionRequest")
        .tool("Bash", json!({"command": "ls"}))
        .event();
    let value = dispatch_json(&d, &event);
    assert_eq!(
        value["hookSpecificOutput"]["decision"],
        json!({"behavior": "deny", "message": "not today"})
    );
}

#[test]
fn test_block_returns_early() {
    let d = dispatcher(
        r#"
Stop:
  - actions:
      - type: output
        decision: block
        reason: R1
  - actions:
      - type: output
        decision: block
        reason: should not appear
      - type: output
        message: should not appear
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::new("Stop").event());
    assert_eq!(value["decision"], "block");
    assert_eq!(value["reason"], "R1");
    assert!(!value.to_string().contains("should not appear"));
}

#[test]
fn test_deny_returns_early_within_rule() {
    let d = dispatcher(
        r#"
PreToolUse:
  - matcher: Bash
    actions:
      - type: output
        permission_decision: deny
        reason: "no {tool_input.command}"
      - type: output
        permission_decision: allow
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::bash("rm -rf /").event());
    assert_eq!(value["hookSpecificOutput"]["permissionDecision"], "deny");
    assert_eq!(value["hookSpecificOutput"]["permissionDecisionReason"], "no rm -rf /");
}

#[test]
fn test_command_failure_blocks_post_tool_use() {
    let d = dispatcher(
        r#"
PostToolUse:
  - actions:
      - type: command
        command: "echo 'vet failed' >&2; exit 1"
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::write("main.go").event());
    assert_eq!(value["decision"], "block");
    assert_eq!(value["reason"], "vet failed");
}

#[test]
fn test_command_json_output_is_merged() {
    let d = dispatcher(
        r#"
UserPromptSubmit:
  - actions:
      - type: command
        command: "printf '%s' '{\"additionalContext\":\"from script\"}'"
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::prompt("hi").event());
    assert_eq!(value["hookSpecificOutput"]["additionalContext"], "from script");
}

// ============================================================================
// Errors and fail-safe
// ============================================================================

#[test]
fn test_process_substitution_forces_fail_safe() {
    let d = dispatcher(
        r#"
PreToolUse:
  - matcher: Bash
    conditions:
      - type: git_tracked_file_operation
        value: "rm|mv"
    actions:
      - type: output
        message: use git rm
"#,
    );
    let event = EventBuilder::bash("rm $(cat <(echo tracked.txt))").event();
    let outcome = d.dispatch(&event);
    assert_eq!(outcome.errors.len(), 1);

    let value = serde_json::to_value(&outcome.output).unwrap();
    assert_eq!(value["hookSpecificOutput"]["permissionDecision"], "deny");
    let reason = value["hookSpecificOutput"]["permissionDecisionReason"]
        .as_str()
        .unwrap();
    assert!(reason.starts_with("rule #0: process substitution detected"));
    assert!(!value.to_string().contains("use git rm"));
}

#[test]
fn test_errors_from_several_rules_are_joined() {
    let d = dispatcher(
        r#"
UserPromptSubmit:
  - conditions:
      - type: prompt_regex
        value: "("
    actions:
      - type: output
        message: x
  - conditions:
      - type: every_n_prompts
        value: "zero"
    actions:
      - type: output
        message: y
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::prompt("hi").event());
    assert_eq!(value["decision"], "block");
    let reason = value["reason"].as_str().unwrap();
    assert!(reason.starts_with("rule #0: invalid regex"), "{}", reason);
    let second = reason.find("rule #1: invalid prompt interval 'zero'");
    assert!(second.is_some_and(|pos| pos > 0), "{}", reason);
}

#[test]
fn test_non_blocking_fail_safe_surfaces_error() {
    let d = dispatcher(
        r#"
SessionEnd:
  - conditions:
      - type: command_contains
        value: x
    actions:
      - type: output
        message: never
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::new("SessionEnd").event());
    assert_eq!(
        value,
        json!({
            "continue": true,
            "systemMessage": "rule #0: condition 'command_contains' is not handled for SessionEnd"
        })
    );
}

// ============================================================================
// Every Nth prompt
// ============================================================================

fn reminder_dispatcher() -> hookrule_common::Dispatcher {
    dispatcher(
        r#"
UserPromptSubmit:
  - conditions:
      - type: every_n_prompts
        value: "5"
    actions:
      - type: output
        message: "time to commit"
"#,
    )
}

#[test]
fn test_every_fifth_prompt_fires_on_fifth() {
    let transcript = transcript_with_prompts("sess-5", 4);
    let event = EventBuilder::prompt("next")
        .session_id("sess-5")
        .transcript(transcript.path())
        .event();
    let value = dispatch_json(&reminder_dispatcher(), &event);
    assert_eq!(value["hookSpecificOutput"]["additionalContext"], "time to commit");
}

#[test]
fn test_every_fifth_prompt_quiet_on_fourth() {
    let transcript = transcript_with_prompts("sess-4", 3);
    let event = EventBuilder::prompt("next")
        .session_id("sess-4")
        .transcript(transcript.path())
        .event();
    let value = dispatch_json(&reminder_dispatcher(), &event);
    assert_eq!(value, json!({"continue": true}));
}

#[test]
fn test_every_fifth_prompt_ignores_other_sessions() {
    let transcript = transcript_with_prompts("other", 4);
    let event = EventBuilder::prompt("next")
        .session_id("sess-x")
        .transcript(transcript.path())
        .event();
    let value = dispatch_json(&reminder_dispatcher(), &event);
    assert_eq!(value, json!({"continue": true}));
}
