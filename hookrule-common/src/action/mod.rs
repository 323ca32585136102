//! Action execution.
//!
//! Every action, whatever its type, is reduced to a [`Directive`] that the
//! merge engine folds into the output.

mod command;
mod output;

pub use command::{interpret, run_command, ExecutionResult};
pub use output::render_output;

use crate::capability::{Capabilities, Decision};
use crate::directive::Directive;
use crate::error::ActionError;
use crate::rules::Action;
use crate::template::render;
use crate::types::Event;

/// Runs actions against one event.
pub struct ActionExecutor<'a> {
    event: &'a Event,
    caps: &'static Capabilities,
}

impl<'a> ActionExecutor<'a> {
    /// Create an executor for `event`.
    pub fn new(event: &'a Event) -> Self {
        Self {
            event,
            caps: Capabilities::of(event.kind()),
        }
    }

    /// Execute `action` and normalise its outcome.
    pub fn execute(&self, action: &Action) -> Result<Directive, ActionError> {
        match action {
            Action::Command(cmd) => {
                let rendered = render(&cmd.command, self.event.raw());
                if rendered.trim().is_empty() {
                    return Err(ActionError::MissingField {
                        action: "command",
                        field: "command",
                    });
                }
                let stdin = cmd.use_stdin.then(|| self.event.raw().to_string());
                tracing::debug!(command = %rendered, use_stdin = cmd.use_stdin, "running command");

                let result = run_command(&rendered, &self.event.common().cwd, stdin.as_deref());
                tracing::debug!(
                    exit_code = result.exit_code,
                    stdout_len = result.stdout.len(),
                    stderr_len = result.stderr.len(),
                    "command finished"
                );
                interpret(&result, self.caps)
            }
            Action::Output(out) => render_output(out, self.event, self.caps),
        }
    }
}

/// Parse a decision string against the kind's vocabulary.
fn parse_decision(value: &str, caps: &Capabilities) -> Result<Option<Decision>, ActionError> {
    caps.vocabulary
        .parse(value)
        .ok_or_else(|| ActionError::InvalidDecision {
            value: value.to_string(),
            event: caps.kind,
        })
}
