//! Static checks over a loaded rule set.

use regex::Regex;

use crate::capability::{Capabilities, Vocabulary};
use crate::error::{ActionError, ConditionError};
use crate::rules::{Action, ConditionKind, OutputAction, RuleSet};
use crate::types::EventKind;

/// One problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub event: EventKind,
    pub rule: usize,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} rule #{}: {}", self.event, self.rule, self.message)
    }
}

/// Report every problem that would surface as a rule error at runtime.
///
/// Decision values containing template placeholders are only known at
/// runtime and are not checked.
pub fn validate(rules: &RuleSet) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    for kind in EventKind::ALL {
        let caps = Capabilities::of(kind);
        for (index, rule) in rules.rules_for(kind).iter().enumerate() {
            let mut report = |message: String| {
                issues.push(ConfigIssue {
                    event: kind,
                    rule: index,
                    message,
                })
            };

            for condition in &rule.conditions {
                if !caps.accepts(&condition.kind) {
                    report(
                        ConditionError::NotHandled {
                            condition: condition.kind.to_string(),
                            event: kind,
                        }
                        .to_string(),
                    );
                    continue;
                }
                match condition.kind {
                    ConditionKind::PromptRegex => {
                        if let Err(e) = Regex::new(&condition.value) {
                            report(
                                ConditionError::InvalidRegex {
                                    pattern: condition.value.clone(),
                                    reason: e.to_string(),
                                }
                                .to_string(),
                            );
                        }
                    }
                    ConditionKind::EveryNPrompts => {
                        let valid = condition
                            .value
                            .trim()
                            .parse::<i64>()
                            .is_ok_and(|n| n > 0);
                        if !valid {
                            report(
                                ConditionError::InvalidInterval(condition.value.clone())
                                    .to_string(),
                            );
                        }
                    }
                    _ => {}
                }
            }

            for action in &rule.actions {
                match action {
                    Action::Command(cmd) if cmd.command.trim().is_empty() => report(
                        ActionError::MissingField {
                            action: "command",
                            field: "command",
                        }
                        .to_string(),
                    ),
                    Action::Command(_) => {}
                    Action::Output(out) => {
                        if let Some(value) = static_decision(out, caps.vocabulary) {
                            if caps.vocabulary.parse(value).is_none() {
                                report(
                                    ActionError::InvalidDecision {
                                        value: value.to_string(),
                                        event: kind,
                                    }
                                    .to_string(),
                                );
                            }
                        }
                    }
                }
            }
        }
    }

    issues
}

/// The decision string an output action would use, if it has no placeholders.
fn static_decision(action: &OutputAction, vocabulary: Vocabulary) -> Option<&str> {
    let field = match vocabulary {
        Vocabulary::Permission => action.permission_decision.as_ref().or(action.decision.as_ref()),
        Vocabulary::Behavior => action.behavior.as_ref().or(action.decision.as_ref()),
        Vocabulary::Block | Vocabulary::None => action.decision.as_ref(),
    };
    field.map(String::as_str).filter(|value| !value.contains('{'))
}
