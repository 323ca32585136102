//! The normalised result of one executed action.

use crate::capability::Decision;

/// What one action asks the merge engine to do.
///
/// Command and output actions both reduce to this shape. Empty strings mean
/// "nothing to add".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directive {
    /// New decision value, already validated against the kind's vocabulary.
    pub decision: Option<Decision>,
    pub reason: String,
    /// Plain message; routed by the merge engine depending on `decision`.
    pub message: String,
    pub additional_context: String,
    pub system_message: String,
    pub updated_input: Option<serde_json::Value>,
    pub interrupt: Option<bool>,
    pub continue_execution: Option<bool>,
    /// Legacy process-exit request; ends the pass.
    pub exit: Option<ExitRequest>,
}

impl Directive {
    /// A directive carrying only a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// A directive setting `decision` with `reason`.
    pub fn decide(decision: Decision, reason: impl Into<String>) -> Self {
        Self {
            decision: Some(decision),
            reason: reason.into(),
            ..Default::default()
        }
    }

    /// A directive carrying only a system message.
    pub fn system_message(message: impl Into<String>) -> Self {
        Self {
            system_message: message.into(),
            ..Default::default()
        }
    }

    /// Whether applying this directive changes nothing.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

/// Request to end the process with `code`, printing `message`.
///
/// A zero code prints to stdout, anything else to stderr. No JSON is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitRequest {
    pub code: i32,
    pub message: String,
}
