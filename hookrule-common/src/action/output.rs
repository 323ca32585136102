//! Templated output actions.

use crate::capability::{Capabilities, Vocabulary};
use crate::directive::{Directive, ExitRequest};
use crate::error::ActionError;
use crate::rules::OutputAction;
use crate::template::render;
use crate::types::Event;

use super::parse_decision;

/// Render an output action into a directive.
pub fn render_output(
    action: &OutputAction,
    event: &Event,
    caps: &Capabilities,
) -> Result<Directive, ActionError> {
    let raw = event.raw();
    let render_opt = |field: &Option<String>| {
        field
            .as_deref()
            .map(|template| render(template, raw))
            .unwrap_or_default()
    };

    let message = render(&action.message, raw);

    if let Some(code) = action.exit_status {
        return Ok(Directive {
            exit: Some(ExitRequest { code, message }),
            ..Default::default()
        });
    }

    let decision_field = match caps.vocabulary {
        Vocabulary::Permission => action.permission_decision.as_ref().or(action.decision.as_ref()),
        Vocabulary::Behavior => action.behavior.as_ref().or(action.decision.as_ref()),
        Vocabulary::Block | Vocabulary::None => action.decision.as_ref(),
    };
    let decision = match decision_field {
        Some(template) => parse_decision(&render(template, raw), caps)?,
        None => None,
    };

    let directive = Directive {
        decision,
        reason: render_opt(&action.reason),
        message,
        additional_context: render_opt(&action.additional_context),
        system_message: render_opt(&action.system_message),
        updated_input: action.updated_input.clone(),
        interrupt: action.interrupt,
        continue_execution: action.continue_execution,
        exit: None,
    };

    if caps.requires_message()
        && directive.message.trim().is_empty()
        && directive.additional_context.is_empty()
        && directive.system_message.is_empty()
        && directive.reason.is_empty()
    {
        return Err(ActionError::MessageRequired(caps.kind));
    }

    Ok(directive)
}
