//! Shell command actions.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use serde_json::{Map, Value};

use crate::capability::{Capabilities, Vocabulary};
use crate::directive::Directive;
use crate::error::ActionError;

use super::parse_decision;

/// Captured outcome of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code; `-1` when the process could not be spawned or was
    /// killed by a signal.
    pub exit_code: i32,
}

impl ExecutionResult {
    fn spawn_failure(error: std::io::Error) -> Self {
        Self {
            stdout: String::new(),
            stderr: error.to_string(),
            exit_code: -1,
        }
    }

    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `command` with `sh -c` and wait for it.
///
/// The child runs in `cwd` when that directory exists. With `stdin` set, the
/// data is written to the child's standard input, which is then closed.
/// Failures are reported in the result, never as an error.
pub fn run_command(command: &str, cwd: &str, stdin: Option<&str>) -> ExecutionResult {
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(command)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let dir = Path::new(cwd);
    if !cwd.is_empty() && dir.is_dir() {
        cmd.current_dir(dir);
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            tracing::warn!("Failed to spawn command '{}': {}", command, e);
            return ExecutionResult::spawn_failure(e);
        }
    };

    // Feed stdin from a separate thread so a child filling its stdout pipe
    // cannot deadlock against us.
    let writer = match (stdin, child.stdin.take()) {
        (Some(data), Some(mut pipe)) => {
            let data = data.to_owned();
            Some(std::thread::spawn(move || {
                if let Err(e) = pipe.write_all(data.as_bytes()) {
                    tracing::debug!("Command closed stdin early: {}", e);
                }
            }))
        }
        _ => None,
    };

    let output = match child.wait_with_output() {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("Failed to wait for command '{}': {}", command, e);
            return ExecutionResult::spawn_failure(e);
        }
    };

    if let Some(writer) = writer {
        if writer.join().is_err() {
            tracing::debug!("Stdin writer for command '{}' panicked", command);
        }
    }

    ExecutionResult {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

/// Turn a command result into a directive for the event kind.
///
/// - exit 0, JSON object on stdout: read as a directive
/// - exit 0, other non-empty stdout: the trimmed text is a plain message
/// - exit 0, empty stdout: no-op
/// - non-zero: the blocking decision (or a system message for kinds that
///   cannot block) with stderr, stdout, or the status as text
pub fn interpret(
    result: &ExecutionResult,
    caps: &Capabilities,
) -> Result<Directive, ActionError> {
    if result.success() {
        let stdout = result.stdout.trim();
        if stdout.is_empty() {
            return Ok(Directive::default());
        }
        if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(stdout) {
            return directive_from_json(&obj, caps);
        }
        return Ok(Directive::message(stdout));
    }

    let text = [result.stderr.trim(), result.stdout.trim()]
        .into_iter()
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("command exited with status {}", result.exit_code));

    Ok(match caps.vocabulary.blocking_decision() {
        Some(blocking) => Directive::decide(blocking, text),
        None => Directive::system_message(text),
    })
}

/// Look up `key` at the top level, then inside `hookSpecificOutput`.
fn field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key)
        .or_else(|| obj.get("hookSpecificOutput").and_then(|h| h.get(key)))
}

fn text<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    field(obj, key).and_then(Value::as_str)
}

fn directive_from_json(
    obj: &Map<String, Value>,
    caps: &Capabilities,
) -> Result<Directive, ActionError> {
    // PermissionRequest nests its answer as `decision: {behavior, ...}`
    let nested = field(obj, "decision").and_then(Value::as_object);
    let nested_text = |key: &str| nested.and_then(|d| d.get(key)).and_then(Value::as_str);

    let raw_decision = match caps.vocabulary {
        Vocabulary::Permission => text(obj, "permissionDecision").or_else(|| text(obj, "decision")),
        Vocabulary::Behavior => nested_text("behavior")
            .or_else(|| text(obj, "behavior"))
            .or_else(|| text(obj, "decision")),
        Vocabulary::Block | Vocabulary::None => text(obj, "decision"),
    };
    let decision = match raw_decision {
        Some(value) => parse_decision(value, caps)?,
        None => None,
    };

    let owned = |value: Option<&str>| value.unwrap_or_default().to_string();

    Ok(Directive {
        decision,
        reason: owned(text(obj, "reason").or_else(|| text(obj, "permissionDecisionReason"))),
        message: owned(text(obj, "message").or_else(|| nested_text("message"))),
        additional_context: owned(text(obj, "additionalContext")),
        system_message: owned(text(obj, "systemMessage")),
        updated_input: field(obj, "updatedInput")
            .or_else(|| nested.and_then(|d| d.get("updatedInput")))
            .cloned(),
        interrupt: field(obj, "interrupt")
            .or_else(|| nested.and_then(|d| d.get("interrupt")))
            .and_then(Value::as_bool),
        continue_execution: obj.get("continue").and_then(Value::as_bool),
        exit: None,
    })
}
