//! Decision merge engine.
//!
//! [`OutputState`] starts at the event kind's default and folds one
//! [`Directive`] per executed action:
//!
//! - text fields concatenate with `\n`, never overwrite
//! - the decision is last-non-empty-wins
//! - a decision change clears fields that belong to the previous branch
//!   (`reason` always, `updated_input` unless the new value is allow,
//!   `interrupt` and the deny message unless it is deny)
//! - the blocking value, `continue: false`, or an exit request end the pass
//!
//! [`OutputState::finish`] applies the fail-safe for aggregated rule errors
//! and produces the [`HookOutput`] for the kind.

use crate::capability::{Capabilities, Decision, MessageTarget, Vocabulary};
use crate::directive::{Directive, ExitRequest};
use crate::error::RuleErrors;
use crate::types::{
    ContextOutput, EventKind, HookOutput, HookSpecificOutput, PermissionRequestDecision,
    PermissionRequestOutput, PreToolUseOutput,
};

/// Whether the pass should go on after a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Accumulating output for one pass.
#[derive(Debug, Clone)]
pub struct OutputState {
    caps: &'static Capabilities,
    decision: Option<Decision>,
    reason: String,
    /// Deny message (PermissionRequest).
    message: String,
    additional_context: String,
    system_message: String,
    updated_input: Option<serde_json::Value>,
    interrupt: bool,
    continue_execution: bool,
    stop_reason: String,
    exit: Option<ExitRequest>,
}

fn append(field: &mut String, text: &str) {
    if text.is_empty() {
        return;
    }
    if !field.is_empty() {
        field.push('\n');
    }
    field.push_str(text);
}

impl OutputState {
    /// Seed the state with the kind's defaults.
    pub fn new(kind: EventKind) -> Self {
        let caps = Capabilities::of(kind);
        Self {
            caps,
            decision: caps.vocabulary.default_decision(),
            reason: String::new(),
            message: String::new(),
            additional_context: String::new(),
            system_message: String::new(),
            updated_input: None,
            interrupt: false,
            continue_execution: true,
            stop_reason: String::new(),
            exit: None,
        }
    }

    /// The exit request recorded by a legacy action, if any.
    pub fn exit_request(&self) -> Option<&ExitRequest> {
        self.exit.as_ref()
    }

    /// Whether the current decision is the kind's blocking value.
    pub fn is_blocking(&self) -> bool {
        self.decision.is_some() && self.decision == self.caps.vocabulary.blocking_decision()
    }

    /// Where reason text lands; PermissionRequest has no reason field.
    fn reason_field(&mut self) -> &mut String {
        match self.caps.vocabulary {
            Vocabulary::Behavior => &mut self.message,
            _ => &mut self.reason,
        }
    }

    fn plain_target(&mut self) -> &mut String {
        match self.caps.message_target {
            MessageTarget::SystemMessage => &mut self.system_message,
            MessageTarget::AdditionalContext => &mut self.additional_context,
        }
    }

    fn set_decision(&mut self, decision: Decision) {
        if self.decision == Some(decision) {
            return;
        }
        tracing::debug!(
            from = ?self.decision.map(|d| d.as_str()),
            to = decision.as_str(),
            "decision changed"
        );
        self.reason.clear();
        if decision != Decision::Allow {
            self.updated_input = None;
        }
        if decision != Decision::Deny {
            self.interrupt = false;
            self.message.clear();
        }
        self.decision = Some(decision);
    }

    /// Fold one directive into the state.
    pub fn apply(&mut self, directive: Directive) -> Flow {
        if let Some(exit) = directive.exit {
            tracing::info!(code = exit.code, "action requested process exit");
            self.exit = Some(exit);
            return Flow::Stop;
        }

        if let Some(decision) = directive.decision {
            self.set_decision(decision);
        }

        append(self.reason_field(), &directive.reason);
        if directive.decision.is_some() {
            append(self.reason_field(), &directive.message);
        } else {
            append(self.plain_target(), &directive.message);
        }
        append(&mut self.additional_context, &directive.additional_context);
        append(&mut self.system_message, &directive.system_message);

        if let Some(input) = directive.updated_input {
            if self.decision == Some(Decision::Allow) {
                self.updated_input = Some(input);
            } else {
                tracing::debug!("ignoring updated_input outside the allow branch");
            }
        }

        if let Some(interrupt) = directive.interrupt {
            if self.decision == Some(Decision::Deny) {
                self.interrupt = interrupt;
            }
        }

        if directive.continue_execution == Some(false) {
            if self.caps.can_block() {
                self.continue_execution = false;
                self.stop_reason = if directive.reason.is_empty() {
                    directive.message
                } else {
                    directive.reason
                };
                tracing::info!("action set continue=false, ending pass");
                return Flow::Stop;
            }
            tracing::debug!(kind = %self.caps.kind, "continue=false ignored for non-blocking kind");
        }

        if directive.decision.is_some() && self.is_blocking() {
            tracing::info!(decision = ?self.decision.map(|d| d.as_str()), "blocking decision, ending pass");
            return Flow::Stop;
        }

        Flow::Continue
    }

    /// Apply the fail-safe for `errors` and build the output.
    pub fn finish(mut self, errors: &RuleErrors) -> HookOutput {
        if !errors.is_empty() {
            let text = errors.to_string();
            match self.caps.vocabulary.blocking_decision() {
                Some(blocking) => {
                    tracing::warn!(kind = %self.caps.kind, "rule errors, forcing {}", blocking);
                    self.set_decision(blocking);
                    append(self.reason_field(), &text);
                }
                None => append(&mut self.system_message, &text),
            }
        }
        self.into_output()
    }

    fn into_output(self) -> HookOutput {
        let non_empty = |s: String| if s.is_empty() { None } else { Some(s) };
        let blocking = self.is_blocking();

        let mut output = HookOutput {
            continue_execution: !self.caps.can_block() || self.continue_execution,
            stop_reason: if self.continue_execution {
                None
            } else {
                non_empty(self.stop_reason)
            },
            system_message: non_empty(self.system_message),
            ..Default::default()
        };

        let decision = self.decision.map(|d| d.as_str().to_string()).unwrap_or_default();
        let context = non_empty(self.additional_context);

        match self.caps.kind {
            EventKind::PreToolUse => {
                output.hook_specific_output =
                    Some(HookSpecificOutput::PreToolUse(PreToolUseOutput {
                        permission_decision: decision,
                        permission_decision_reason: non_empty(self.reason),
                        updated_input: self.updated_input,
                        additional_context: context,
                    }));
            }
            EventKind::PermissionRequest => {
                let deny = self.decision == Some(Decision::Deny);
                output.hook_specific_output = Some(HookSpecificOutput::PermissionRequest(
                    PermissionRequestOutput {
                        decision: PermissionRequestDecision {
                            behavior: decision,
                            updated_input: self.updated_input,
                            message: if deny { non_empty(self.message) } else { None },
                            interrupt: (deny && self.interrupt).then_some(true),
                        },
                    },
                ));
            }
            EventKind::PostToolUse | EventKind::UserPromptSubmit => {
                if blocking {
                    output.decision = Some(decision);
                    output.reason = non_empty(self.reason);
                }
                output.hook_specific_output = context.map(|additional_context| {
                    let body = ContextOutput { additional_context };
                    if self.caps.kind == EventKind::PostToolUse {
                        HookSpecificOutput::PostToolUse(body)
                    } else {
                        HookSpecificOutput::UserPromptSubmit(body)
                    }
                });
            }
            EventKind::Stop | EventKind::SubagentStop => {
                if blocking {
                    output.decision = Some(decision);
                    output.reason = non_empty(self.reason);
                }
            }
            EventKind::SessionStart | EventKind::SubagentStart => {
                output.hook_specific_output = context.map(|additional_context| {
                    let body = ContextOutput { additional_context };
                    if self.caps.kind == EventKind::SessionStart {
                        HookSpecificOutput::SessionStart(body)
                    } else {
                        HookSpecificOutput::SubagentStart(body)
                    }
                });
            }
            EventKind::Notification | EventKind::PreCompact | EventKind::SessionEnd => {}
        }

        output
    }
}
