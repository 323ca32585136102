//! Rule dispatch: one event in, one output out.

use crate::action::ActionExecutor;
use crate::capability::Capabilities;
use crate::condition::ConditionEvaluator;
use crate::directive::ExitRequest;
use crate::error::RuleErrors;
use crate::guard::{GitIndex, TrackedIndex};
use crate::matcher::matches;
use crate::merge::{Flow, OutputState};
use crate::rules::RuleSet;
use crate::types::{Event, HookOutput};

/// Result of one dispatch pass.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// Output for the event kind, with the fail-safe already applied.
    pub output: HookOutput,
    /// Set when a legacy action asked for a process exit.
    pub exit: Option<ExitRequest>,
    /// Errors recorded while evaluating rules, in rule order.
    pub errors: RuleErrors,
}

/// Evaluates configured rules against events.
pub struct Dispatcher {
    rules: RuleSet,
    index: Box<dyn TrackedIndex>,
}

impl Dispatcher {
    /// Create a dispatcher that queries git for tracked paths.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_index(rules, GitIndex)
    }

    /// Create a dispatcher with a custom tracked-path index.
    pub fn with_index(rules: RuleSet, index: impl TrackedIndex + 'static) -> Self {
        Self {
            rules,
            index: Box::new(index),
        }
    }

    /// Run every applicable rule for `event` in declared order.
    ///
    /// A rule applies when its matcher accepts the event's subject and all
    /// its conditions hold. A rule whose condition or action fails is
    /// abandoned and its error recorded; later rules still run.
    pub fn dispatch(&self, event: &Event) -> DispatchOutcome {
        let kind = event.kind();
        let caps = Capabilities::of(kind);
        let rules = self.rules.rules_for(kind);
        tracing::debug!(event = %kind, rules = rules.len(), "dispatching event");

        let conditions = ConditionEvaluator::new(event, self.index.as_ref());
        let executor = ActionExecutor::new(event);
        let mut state = OutputState::new(kind);
        let mut errors = RuleErrors::new();

        'rules: for (index, rule) in rules.iter().enumerate() {
            if let Some(subject) = caps.subject.extract(event.input()) {
                if !matches(&rule.matcher, subject) {
                    tracing::debug!(rule = index, matcher = %rule.matcher, subject, "matcher rejected");
                    continue;
                }
            }

            match conditions.all(&rule.conditions) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::warn!("Skipping rule #{}: {}", index, e);
                    errors.push(index, e);
                    continue;
                }
            }

            tracing::debug!(rule = index, actions = rule.actions.len(), "rule applies");
            for action in &rule.actions {
                match executor.execute(action) {
                    Ok(directive) if directive.is_noop() => {
                        tracing::debug!(rule = index, action = action.type_name(), "action produced nothing");
                    }
                    Ok(directive) => {
                        if state.apply(directive) == Flow::Stop {
                            tracing::debug!(rule = index, "pass ended early");
                            break 'rules;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Abandoning rule #{} at {} action: {}", index, action.type_name(), e);
                        errors.push(index, e);
                        continue 'rules;
                    }
                }
            }
        }

        let exit = state.exit_request().cloned();
        let output = state.finish(&errors);
        DispatchOutcome {
            output,
            exit,
            errors,
        }
    }
}
