//! Hook event input types.
//!
//! These types represent the JSON the host passes to a hook on stdin. The
//! decoded [`Event`] also keeps the untyped tree, since template placeholders
//! resolve against the raw input rather than the typed fields.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::HookError;
use crate::types::{CommonInput, EventKind};

/// SessionStart input - fired when a session begins or resumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStartInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// Source of the session start (startup, resume, clear, compact).
    #[serde(default)]
    pub source: Option<String>,

    /// The model being used.
    #[serde(default)]
    pub model: Option<String>,
}

/// UserPromptSubmit input - fired when the user submits a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPromptSubmitInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// The user's prompt text.
    pub prompt: String,
}

/// PreToolUse input - fired before tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreToolUseInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// The tool being invoked.
    pub tool_name: String,

    /// Tool input parameters.
    #[serde(default)]
    pub tool_input: serde_json::Value,

    /// Unique identifier for this tool use.
    #[serde(default)]
    pub tool_use_id: Option<String>,
}

/// PermissionRequest input - fired when a permission dialog would appear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionRequestInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// The tool requesting permission.
    pub tool_name: String,

    /// Tool input parameters.
    #[serde(default)]
    pub tool_input: serde_json::Value,

    /// Suggested permission updates offered by the host.
    #[serde(default)]
    pub permission_suggestions: Option<serde_json::Value>,
}

/// PostToolUse input - fired after a tool succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostToolUseInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// The tool that was invoked.
    pub tool_name: String,

    /// Tool input parameters.
    #[serde(default)]
    pub tool_input: serde_json::Value,

    /// Tool execution result.
    #[serde(default)]
    pub tool_response: Option<serde_json::Value>,

    /// Unique identifier for this tool use.
    #[serde(default)]
    pub tool_use_id: Option<String>,
}

/// Notification input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// The notification message.
    #[serde(default)]
    pub message: Option<String>,

    /// The notification type.
    #[serde(default)]
    pub notification_type: Option<String>,
}

/// Stop input - fired when the agent finishes responding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// Whether a stop hook is already keeping the agent running.
    #[serde(default)]
    pub stop_hook_active: bool,
}

/// SubagentStart input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubagentStartInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// Identifier of the spawned subagent.
    #[serde(default)]
    pub agent_id: Option<String>,

    /// The subagent type being spawned.
    #[serde(default)]
    pub agent_type: Option<String>,
}

/// SubagentStop input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubagentStopInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// Whether a stop hook is already keeping the subagent running.
    #[serde(default)]
    pub stop_hook_active: bool,

    /// Identifier of the finished subagent.
    #[serde(default)]
    pub agent_id: Option<String>,

    /// The subagent type that finished.
    #[serde(default)]
    pub agent_type: Option<String>,

    /// Transcript of the subagent conversation.
    #[serde(default)]
    pub agent_transcript_path: Option<String>,
}

/// PreCompact input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreCompactInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// What triggered compaction ("manual" or "auto").
    #[serde(default)]
    pub trigger: Option<String>,

    /// Instructions supplied with a manual compaction.
    #[serde(default)]
    pub custom_instructions: Option<String>,
}

/// SessionEnd input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEndInput {
    /// Common input fields.
    #[serde(flatten)]
    pub common: CommonInput,

    /// Why the session ended.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Enum wrapper for all event inputs, enabling type-safe dispatch.
#[derive(Debug, Clone, Serialize)]
pub enum EventInput {
    /// SessionStart input.
    SessionStart(SessionStartInput),
    /// UserPromptSubmit input.
    UserPromptSubmit(UserPromptSubmitInput),
    /// PreToolUse input.
    PreToolUse(PreToolUseInput),
    /// PermissionRequest input.
    PermissionRequest(PermissionRequestInput),
    /// PostToolUse input.
    PostToolUse(PostToolUseInput),
    /// Notification input.
    Notification(NotificationInput),
    /// Stop input.
    Stop(StopInput),
    /// SubagentStart input.
    SubagentStart(SubagentStartInput),
    /// SubagentStop input.
    SubagentStop(SubagentStopInput),
    /// PreCompact input.
    PreCompact(PreCompactInput),
    /// SessionEnd input.
    SessionEnd(SessionEndInput),
}

fn variant<T, E>(value: serde_json::Value) -> Result<T, E>
where
    T: DeserializeOwned,
    E: serde::de::Error,
{
    serde_json::from_value(value).map_err(E::custom)
}

impl<'de> Deserialize<'de> for EventInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        // Peek at hook_event_name before choosing the variant
        let value = serde_json::Value::deserialize(deserializer)?;

        let name = value
            .get("hook_event_name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| D::Error::missing_field("hook_event_name"))?;

        let kind: EventKind = name.parse().map_err(|_| {
            let names: Vec<&'static str> = EventKind::ALL.iter().map(|k| k.as_str()).collect();
            D::Error::custom(format!(
                "unknown hook_event_name `{}`, expected one of {}",
                name,
                names.join(", ")
            ))
        })?;

        Ok(match kind {
            EventKind::SessionStart => EventInput::SessionStart(variant(value)?),
            EventKind::UserPromptSubmit => EventInput::UserPromptSubmit(variant(value)?),
            EventKind::PreToolUse => EventInput::PreToolUse(variant(value)?),
            EventKind::PermissionRequest => EventInput::PermissionRequest(variant(value)?),
            EventKind::PostToolUse => EventInput::PostToolUse(variant(value)?),
            EventKind::Notification => EventInput::Notification(variant(value)?),
            EventKind::Stop => EventInput::Stop(variant(value)?),
            EventKind::SubagentStart => EventInput::SubagentStart(variant(value)?),
            EventKind::SubagentStop => EventInput::SubagentStop(variant(value)?),
            EventKind::PreCompact => EventInput::PreCompact(variant(value)?),
            EventKind::SessionEnd => EventInput::SessionEnd(variant(value)?),
        })
    }
}

impl EventInput {
    /// Get the event kind for this input.
    pub fn kind(&self) -> EventKind {
        match self {
            EventInput::SessionStart(_) => EventKind::SessionStart,
            EventInput::UserPromptSubmit(_) => EventKind::UserPromptSubmit,
            EventInput::PreToolUse(_) => EventKind::PreToolUse,
            EventInput::PermissionRequest(_) => EventKind::PermissionRequest,
            EventInput::PostToolUse(_) => EventKind::PostToolUse,
            EventInput::Notification(_) => EventKind::Notification,
            EventInput::Stop(_) => EventKind::Stop,
            EventInput::SubagentStart(_) => EventKind::SubagentStart,
            EventInput::SubagentStop(_) => EventKind::SubagentStop,
            EventInput::PreCompact(_) => EventKind::PreCompact,
            EventInput::SessionEnd(_) => EventKind::SessionEnd,
        }
    }

    /// Get the common input fields.
    pub fn common(&self) -> &CommonInput {
        match self {
            EventInput::SessionStart(i) => &i.common,
            EventInput::UserPromptSubmit(i) => &i.common,
            EventInput::PreToolUse(i) => &i.common,
            EventInput::PermissionRequest(i) => &i.common,
            EventInput::PostToolUse(i) => &i.common,
            EventInput::Notification(i) => &i.common,
            EventInput::Stop(i) => &i.common,
            EventInput::SubagentStart(i) => &i.common,
            EventInput::SubagentStop(i) => &i.common,
            EventInput::PreCompact(i) => &i.common,
            EventInput::SessionEnd(i) => &i.common,
        }
    }

    /// Tool name, for tool events.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            EventInput::PreToolUse(i) => Some(&i.tool_name),
            EventInput::PermissionRequest(i) => Some(&i.tool_name),
            EventInput::PostToolUse(i) => Some(&i.tool_name),
            _ => None,
        }
    }

    /// Tool input parameters, for tool events.
    pub fn tool_input(&self) -> Option<&serde_json::Value> {
        match self {
            EventInput::PreToolUse(i) => Some(&i.tool_input),
            EventInput::PermissionRequest(i) => Some(&i.tool_input),
            EventInput::PostToolUse(i) => Some(&i.tool_input),
            _ => None,
        }
    }

    /// A string field of `tool_input`, e.g. `command` or `file_path`.
    pub fn tool_input_str(&self, key: &str) -> Option<&str> {
        self.tool_input()
            .and_then(|v| v.get(key))
            .and_then(|v| v.as_str())
    }

    /// Prompt text, for UserPromptSubmit.
    pub fn prompt(&self) -> Option<&str> {
        match self {
            EventInput::UserPromptSubmit(i) => Some(&i.prompt),
            _ => None,
        }
    }

    /// Termination reason, for SessionEnd.
    pub fn end_reason(&self) -> Option<&str> {
        match self {
            EventInput::SessionEnd(i) => i.reason.as_deref(),
            _ => None,
        }
    }

    /// Session start source, for SessionStart.
    pub fn source(&self) -> Option<&str> {
        match self {
            EventInput::SessionStart(i) => i.source.as_deref(),
            _ => None,
        }
    }

    /// Notification type, for Notification.
    pub fn notification_type(&self) -> Option<&str> {
        match self {
            EventInput::Notification(i) => i.notification_type.as_deref(),
            _ => None,
        }
    }

    /// Subagent type, for SubagentStart and SubagentStop.
    pub fn agent_type(&self) -> Option<&str> {
        match self {
            EventInput::SubagentStart(i) => i.agent_type.as_deref(),
            EventInput::SubagentStop(i) => i.agent_type.as_deref(),
            _ => None,
        }
    }

    /// Compaction trigger, for PreCompact.
    pub fn trigger(&self) -> Option<&str> {
        match self {
            EventInput::PreCompact(i) => i.trigger.as_deref(),
            _ => None,
        }
    }
}

/// A decoded event: the typed input plus the raw JSON it came from.
#[derive(Debug, Clone)]
pub struct Event {
    input: EventInput,
    raw: serde_json::Value,
}

impl Event {
    /// Decode an event from its JSON text.
    pub fn decode(json: &str) -> Result<Self, HookError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        Self::from_value(raw)
    }

    /// Decode an event from an already parsed JSON value.
    pub fn from_value(raw: serde_json::Value) -> Result<Self, HookError> {
        let input: EventInput = serde_json::from_value(raw.clone())?;
        Ok(Self { input, raw })
    }

    /// The typed input.
    pub fn input(&self) -> &EventInput {
        &self.input
    }

    /// The raw JSON tree, used for template resolution and stdin piping.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }

    /// Shorthand for the event kind.
    pub fn kind(&self) -> EventKind {
        self.input.kind()
    }

    /// Shorthand for the common envelope.
    pub fn common(&self) -> &CommonInput {
        self.input.common()
    }
}
