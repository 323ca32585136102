//! Per-event-kind capability table.
//!
//! Every kind maps to one [`Capabilities`] value describing which
//! discriminator the matcher tests, which condition families it accepts,
//! which decision vocabulary it speaks, and where plain messages land. The
//! condition evaluator, action executor and merge engine are generic over
//! this bundle.

use crate::rules::{ConditionGroup, ConditionKind};
use crate::types::{EventInput, EventKind};

/// A decision value, across all vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
    Ask,
    Block,
}

impl Decision {
    /// Wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Deny => "deny",
            Decision::Ask => "ask",
            Decision::Block => "block",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of decisions an event kind understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    /// No decision field; the kind is a side-channel notification.
    None,
    /// `block` or nothing.
    Block,
    /// `allow`, `deny` or `ask` (PreToolUse).
    Permission,
    /// `allow` or `deny` (PermissionRequest).
    Behavior,
}

impl Vocabulary {
    /// Parse a decision string. Empty strings mean "no decision".
    ///
    /// Returns `None` if the string is not part of this vocabulary.
    pub fn parse(&self, value: &str) -> Option<Option<Decision>> {
        let value = value.trim();
        if value.is_empty() {
            return Some(None);
        }
        let decision = match (self, value) {
            (Vocabulary::Block, "block") => Decision::Block,
            (Vocabulary::Permission, "allow") | (Vocabulary::Behavior, "allow") => Decision::Allow,
            (Vocabulary::Permission, "deny") | (Vocabulary::Behavior, "deny") => Decision::Deny,
            (Vocabulary::Permission, "ask") => Decision::Ask,
            _ => return None,
        };
        Some(Some(decision))
    }

    /// The value the output is seeded with.
    pub fn default_decision(&self) -> Option<Decision> {
        match self {
            Vocabulary::Permission | Vocabulary::Behavior => Some(Decision::Allow),
            Vocabulary::Block | Vocabulary::None => None,
        }
    }

    /// The value that blocks, ends the pass early, and is forced on errors.
    pub fn blocking_decision(&self) -> Option<Decision> {
        match self {
            Vocabulary::Permission | Vocabulary::Behavior => Some(Decision::Deny),
            Vocabulary::Block => Some(Decision::Block),
            Vocabulary::None => None,
        }
    }
}

/// Which event field the rule matcher is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSubject {
    /// The kind has no discriminator; every rule's matcher is ignored.
    Always,
    ToolName,
    Source,
    NotificationType,
    AgentType,
    Trigger,
}

impl MatchSubject {
    /// Extract the subject string. Missing optional fields read as "".
    pub fn extract<'a>(&self, input: &'a EventInput) -> Option<&'a str> {
        let value = match self {
            MatchSubject::Always => return None,
            MatchSubject::ToolName => input.tool_name(),
            MatchSubject::Source => input.source(),
            MatchSubject::NotificationType => input.notification_type(),
            MatchSubject::AgentType => input.agent_type(),
            MatchSubject::Trigger => input.trigger(),
        };
        Some(value.unwrap_or(""))
    }
}

/// Where a message without a decision accumulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTarget {
    SystemMessage,
    AdditionalContext,
}

/// Everything the generic engine needs to know about one event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub kind: EventKind,
    pub subject: MatchSubject,
    /// Condition families accepted besides [`ConditionGroup::Common`].
    pub extra_conditions: &'static [ConditionGroup],
    pub vocabulary: Vocabulary,
    pub message_target: MessageTarget,
}

impl Capabilities {
    /// Look up the bundle for `kind`.
    pub fn of(kind: EventKind) -> &'static Capabilities {
        // CAPABILITIES is declared in EventKind declaration order
        &CAPABILITIES[kind as usize]
    }

    /// Whether the kind can express a blocking decision.
    pub fn can_block(&self) -> bool {
        self.vocabulary != Vocabulary::None
    }

    /// Whether output actions must render a message.
    pub fn requires_message(&self) -> bool {
        !self.can_block()
    }

    /// Whether a condition kind may be used with this event kind.
    pub fn accepts(&self, condition: &ConditionKind) -> bool {
        match condition.group() {
            Some(ConditionGroup::Common) => true,
            Some(group) => self.extra_conditions.contains(&group),
            None => false,
        }
    }
}

const TOOL: &[ConditionGroup] = &[ConditionGroup::Tool];

static CAPABILITIES: [Capabilities; 11] = [
    Capabilities {
        kind: EventKind::SessionStart,
        subject: MatchSubject::Source,
        extra_conditions: &[],
        vocabulary: Vocabulary::None,
        message_target: MessageTarget::AdditionalContext,
    },
    Capabilities {
        kind: EventKind::UserPromptSubmit,
        subject: MatchSubject::Always,
        extra_conditions: &[ConditionGroup::Prompt],
        vocabulary: Vocabulary::Block,
        message_target: MessageTarget::AdditionalContext,
    },
    Capabilities {
        kind: EventKind::PreToolUse,
        subject: MatchSubject::ToolName,
        extra_conditions: TOOL,
        vocabulary: Vocabulary::Permission,
        message_target: MessageTarget::SystemMessage,
    },
    Capabilities {
        kind: EventKind::PermissionRequest,
        subject: MatchSubject::ToolName,
        extra_conditions: TOOL,
        vocabulary: Vocabulary::Behavior,
        message_target: MessageTarget::SystemMessage,
    },
    Capabilities {
        kind: EventKind::PostToolUse,
        subject: MatchSubject::ToolName,
        extra_conditions: TOOL,
        vocabulary: Vocabulary::Block,
        message_target: MessageTarget::AdditionalContext,
    },
    Capabilities {
        kind: EventKind::Notification,
        subject: MatchSubject::NotificationType,
        extra_conditions: &[],
        vocabulary: Vocabulary::None,
        message_target: MessageTarget::SystemMessage,
    },
    Capabilities {
        kind: EventKind::Stop,
        subject: MatchSubject::Always,
        extra_conditions: &[],
        vocabulary: Vocabulary::Block,
        message_target: MessageTarget::SystemMessage,
    },
    Capabilities {
        kind: EventKind::SubagentStart,
        subject: MatchSubject::AgentType,
        extra_conditions: &[],
        vocabulary: Vocabulary::None,
        message_target: MessageTarget::AdditionalContext,
    },
    Capabilities {
        kind: EventKind::SubagentStop,
        subject: MatchSubject::AgentType,
        extra_conditions: &[],
        vocabulary: Vocabulary::Block,
        message_target: MessageTarget::SystemMessage,
    },
    Capabilities {
        kind: EventKind::PreCompact,
        subject: MatchSubject::Trigger,
        extra_conditions: &[],
        vocabulary: Vocabulary::None,
        message_target: MessageTarget::SystemMessage,
    },
    Capabilities {
        kind: EventKind::SessionEnd,
        subject: MatchSubject::Always,
        extra_conditions: &[ConditionGroup::SessionEnd],
        vocabulary: Vocabulary::None,
        message_target: MessageTarget::SystemMessage,
    },
];
