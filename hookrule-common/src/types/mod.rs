//! Type definitions for hook event inputs and outputs.

mod common;
mod input;
mod output;

pub use common::{CommonInput, EventKind};
pub use input::{
    Event, EventInput, NotificationInput, PermissionRequestInput, PostToolUseInput,
    PreCompactInput, PreToolUseInput, SessionEndInput, SessionStartInput, StopInput,
    SubagentStartInput, SubagentStopInput, UserPromptSubmitInput,
};
pub use output::{
    ContextOutput, HookOutput, HookSpecificOutput, PermissionRequestDecision,
    PermissionRequestOutput, PreToolUseOutput,
};
