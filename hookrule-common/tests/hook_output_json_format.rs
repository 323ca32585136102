//! Tests verifying the exact JSON output shape for each event kind.


use serde_json::json;
use test_helpers::{dispatch_json, dispatcher, EventBuilder};

// ============================================================================
// Tool events
// ============================================================================

/// PreToolUse always carries `permissionDecision`:
/// ```json
/// {
///   "continue": true,
///   "hookSpecificOutput": {
///     "hookEventName": "PreToolUse",
///     "permissionDecision": "allow",
///     "updatedInput": {...}
///   }
/// }
/// ```
#[test]
fn test_pre_tool_use_allow_with_updated_input() {
    let d = dispatcher(
        r#"
PreToolUse:
  - actions:
      - type: output
        permission_decision: allow
        updated_input:
          command: "ls -la"
        additional_context: "rewrote {tool_input.command}"
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::bash("ls").event());
    assert_eq!(
        value,
        json!({
            "continue": true,
            "hookSpecificOutput": {
                "hookEventName": "PreToolUse",
                "permissionDecision": "allow",
                "updatedInput": {"command": "ls -la"},
                "additionalContext": "rewrote ls"
            }
        })
    );
}

#[test]
fn test_pre_tool_use_plain_message_is_system_message() {
    let d = dispatcher(
        r#"
PreToolUse:
  - actions:
      - type: output
        message: "running {tool_name}"
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::bash("ls").event());
    assert_eq!(value["systemMessage"], "running Bash");
    assert_eq!(value["hookSpecificOutput"]["permissionDecision"], "allow");
}

/// PermissionRequest nests the behavior:
/// ```json
/// {"hookSpecificOutput": {"hookEventName": "PermissionRequest",
///   "decision": {"behavior": "deny", "message": "...", "interrupt": true}}}
/// ```
#[test]
fn test_permission_request_deny_with_interrupt() {
    let d = dispatcher(
        r#"
PermissionRequest:
  - actions:
      - type: output
        behavior: deny
        message: "no {tool_name}"
        interrupt: true
"#,
    );
    let event = EventBuilder::new("PermissionRequest")
        .tool("Bash", json!({"command": "ls"}))
        .event();
    let value = dispatch_json(&d, &event);
    assert_eq!(
        value,
        json!({
            "continue": true,
            "hookSpecificOutput": {
                "hookEventName": "PermissionRequest",
                "decision": {"behavior": "deny", "message": "no Bash", "interrupt": true}
            }
        })
    );
}

#[test]
fn test_post_tool_use_block_and_context() {
    let d = dispatcher(
        r#"
PostToolUse:
  - actions:
      - type: output
        additional_context: "checked"
      - type: output
        decision: block
        reason: "bad write"
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::write("a.txt").event());
    assert_eq!(
        value,
        json!({
            "continue": true,
            "decision": "block",
            "reason": "bad write",
            "hookSpecificOutput": {
                "hookEventName": "PostToolUse",
                "additionalContext": "checked"
            }
        })
    );
}

// ============================================================================
// Session and agent events
// ============================================================================

#[test]
fn test_session_start_additional_context() {
    let d = dispatcher(
        r#"
SessionStart:
  - matcher: startup
    actions:
      - type: output
        message: "session {session_id} started"
"#,
    );
    let event = EventBuilder::new("SessionStart")
        .field("source", json!("startup"))
        .event();
    let value = dispatch_json(&d, &event);
    assert_eq!(
        value,
        json!({
            "continue": true,
            "hookSpecificOutput": {
                "hookEventName": "SessionStart",
                "additionalContext": "session test-session started"
            }
        })
    );

    let resume = EventBuilder::new("SessionStart")
        .field("source", json!("resume"))
        .event();
    assert_eq!(dispatch_json(&d, &resume), json!({"continue": true}));
}

#[test]
fn test_subagent_start_additional_context() {
    let d = dispatcher(
        r#"
SubagentStart:
  - matcher: Explore
    actions:
      - type: output
        message: "be brief"
"#,
    );
    let event = EventBuilder::new("SubagentStart")
        .field("agent_type", json!("Explore"))
        .event();
    let value = dispatch_json(&d, &event);
    assert_eq!(value["hookSpecificOutput"]["hookEventName"], "SubagentStart");
    assert_eq!(value["hookSpecificOutput"]["additionalContext"], "be brief");
}

#[test]
fn test_subagent_stop_block() {
    let d = dispatcher(
        r#"
SubagentStop:
  - actions:
      - type: output
        decision: block
        message: "finish the task"
"#,
    );
    let event = EventBuilder::new("SubagentStop")
        .field("agent_type", json!("general"))
        .event();
    let value = dispatch_json(&d, &event);
    assert_eq!(
        value,
        json!({"continue": true, "decision": "block", "reason": "finish the task"})
    );
}

#[test]
fn test_stop_continue_false_sets_stop_reason() {
    let d = dispatcher(
        r#"
Stop:
  - actions:
      - type: output
        message: "halt everything"
        continue: false
"#,
    );
    let value = dispatch_json(&d, &EventBuilder::new("Stop").event());
    assert_eq!(
        value,
        json!({"continue": false, "stopReason": "halt everything", "systemMessage": "halt everything"})
    );
}

// ============================================================================
// Notification-style events
// ============================================================================

#[test]
fn test_notification_matcher_and_system_message() {
    let d = dispatcher(
        r#"
Notification:
  - matcher: idle_prompt
    actions:
      - type: output
        message: "{message}"
"#,
    );
    let event = EventBuilder::new("Notification")
        .field("message", json!("Waiting for input"))
        .field("notification_type", json!("idle_prompt"))
        .event();
    assert_eq!(
        dispatch_json(&d, &event),
        json!({"continue": true, "systemMessage": "Waiting for input"})
    );

    let untyped = EventBuilder::new("Notification").event();
    assert_eq!(dispatch_json(&d, &untyped), json!({"continue": true}));
}

#[test]
fn test_session_end_reason_condition() {
    let d = dispatcher(
        r#"
SessionEnd:
  - conditions:
      - type: reason_is
        value: logout
    actions:
      - type: output
        message: "bye"
        additional_context: "dropped"
"#,
    );
    let event = EventBuilder::new("SessionEnd")
        .field("reason", json!("logout"))
        .event();
    assert_eq!(
        dispatch_json(&d, &event),
        json!({"continue": true, "systemMessage": "bye"})
    );
}

#[test]
fn test_pre_compact_trigger_matcher() {
    let d = dispatcher(
        r#"
PreCompact:
  - matcher: auto
    actions:
      - type: output
        message: "compacting"
"#,
    );
    let auto = EventBuilder::new("PreCompact")
        .field("trigger", json!("auto"))
        .event();
    assert_eq!(
        dispatch_json(&d, &auto),
        json!({"continue": true, "systemMessage": "compacting"})
    );
}
