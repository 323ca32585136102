//! Common types shared across all event inputs and outputs.

use serde::{Deserialize, Serialize};

/// All hook event kinds the dispatcher understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Session begins or resumes.
    SessionStart,
    /// User submits a prompt.
    UserPromptSubmit,
    /// Before tool execution.
    PreToolUse,
    /// When a permission dialog would appear.
    PermissionRequest,
    /// After a tool succeeds.
    PostToolUse,
    /// The host sends a notification.
    Notification,
    /// The agent finishes responding.
    Stop,
    /// A subagent is spawned.
    SubagentStart,
    /// A subagent finishes.
    SubagentStop,
    /// Before context compaction.
    PreCompact,
    /// Session terminates.
    SessionEnd,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 11] = [
        EventKind::SessionStart,
        EventKind::UserPromptSubmit,
        EventKind::PreToolUse,
        EventKind::PermissionRequest,
        EventKind::PostToolUse,
        EventKind::Notification,
        EventKind::Stop,
        EventKind::SubagentStart,
        EventKind::SubagentStop,
        EventKind::PreCompact,
        EventKind::SessionEnd,
    ];

    /// The wire name used in `hook_event_name` and config keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SessionStart => "SessionStart",
            EventKind::UserPromptSubmit => "UserPromptSubmit",
            EventKind::PreToolUse => "PreToolUse",
            EventKind::PermissionRequest => "PermissionRequest",
            EventKind::PostToolUse => "PostToolUse",
            EventKind::Notification => "Notification",
            EventKind::Stop => "Stop",
            EventKind::SubagentStart => "SubagentStart",
            EventKind::SubagentStop => "SubagentStop",
            EventKind::PreCompact => "PreCompact",
            EventKind::SessionEnd => "SessionEnd",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = crate::error::HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| crate::error::HookError::UnknownEvent(s.to_string()))
    }
}

fn default_permission_mode() -> String {
    "default".to_string()
}

/// Common fields present in all event inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonInput {
    /// Unique session identifier.
    pub session_id: String,

    /// Path to the transcript file.
    pub transcript_path: String,

    /// Current working directory.
    pub cwd: String,

    /// Permission mode (e.g., "default", "plan", "bypassPermissions").
    #[serde(default = "default_permission_mode")]
    pub permission_mode: String,

    /// The hook event name.
    pub hook_event_name: EventKind,
}
