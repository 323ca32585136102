//! Hook output types.
//!
//! These mirror the JSON shape the host expects on stdout. Empty values are
//! omitted; the per-kind constraints (which fields exist at all) are applied
//! by the merge engine when it builds a [`HookOutput`].

use serde::{Deserialize, Serialize};

/// The one JSON object written to stdout.
///
/// - `continue`: whether the host should keep going (always present)
/// - `stopReason`: shown when `continue` is false
/// - `systemMessage`: message surfaced to the user
/// - `decision` / `reason`: top-level block decision for block-vocabulary kinds
/// - `hookSpecificOutput`: kind-specific fields, tagged by `hookEventName`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Whether to continue execution.
    #[serde(default = "default_continue", rename = "continue")]
    pub continue_execution: bool,

    /// Reason for stopping (only set when `continue` is false).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,

    /// Message surfaced to the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,

    /// `"block"` when a block-vocabulary kind blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,

    /// Explanation accompanying `decision`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Kind-specific output fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

fn default_continue() -> bool {
    true
}

impl Default for HookOutput {
    fn default() -> Self {
        Self {
            continue_execution: true,
            stop_reason: None,
            system_message: None,
            decision: None,
            reason: None,
            hook_specific_output: None,
        }
    }
}

impl HookOutput {
    /// Minimal always-valid output carrying `error` as the system message.
    ///
    /// Emitted when the real output cannot be serialized.
    pub fn fallback(error: impl std::fmt::Display) -> Self {
        Self {
            system_message: Some(error.to_string()),
            ..Default::default()
        }
    }

    /// Serialize to a JSON line, falling back to [`HookOutput::fallback`].
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize hook output: {}", e);
                // The fallback holds only a bool and a string
                serde_json::to_string(&Self::fallback(&e))
                    .unwrap_or_else(|_| r#"{"continue":true}"#.to_string())
            }
        }
    }
}

/// Kind-specific output fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "hookEventName")]
pub enum HookSpecificOutput {
    /// Permission decision for a pending tool call.
    PreToolUse(PreToolUseOutput),
    /// Answer to a permission dialog.
    PermissionRequest(PermissionRequestOutput),
    /// Context appended after a tool ran.
    PostToolUse(ContextOutput),
    /// Context appended to a submitted prompt.
    UserPromptSubmit(ContextOutput),
    /// Context injected at session start.
    SessionStart(ContextOutput),
    /// Context injected into a starting subagent.
    SubagentStart(ContextOutput),
}

/// PreToolUse permission decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreToolUseOutput {
    /// `allow`, `deny` or `ask`; always present.
    pub permission_decision: String,

    /// Explanation for the decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,

    /// Replacement tool input (allow only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_input: Option<serde_json::Value>,

    /// Context for the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

/// PermissionRequest answer wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionRequestOutput {
    pub decision: PermissionRequestDecision,
}

/// The behavior chosen for a permission dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRequestDecision {
    /// `allow` or `deny`; always present.
    pub behavior: String,

    /// Replacement tool input (allow only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_input: Option<serde_json::Value>,

    /// Message shown to the agent (deny only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Interrupt the agent (deny only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupt: Option<bool>,
}

/// Output carrying only additional context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOutput {
    pub additional_context: String,
}
