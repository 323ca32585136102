//! Condition evaluation.
//!
//! Conditions are checked against the decoded event. Whether a condition
//! type is usable for an event kind comes from the capability table; types
//! outside it report [`ConditionError::NotHandled`] rather than `false`, so
//! configuration mistakes surface through the fail-safe path.

mod filesystem;
mod transcript;

use std::path::Path;

use regex::Regex;

use crate::capability::Capabilities;
use crate::error::ConditionError;
use crate::guard::{is_git_tracked_operation, TrackedIndex};
use crate::rules::{Condition, ConditionKind};
use crate::types::Event;

pub use filesystem::{exists, exists_recursive, resolve, EntryKind};
pub use transcript::{count_user_entries, is_every_nth_prompt};

/// Evaluates conditions for one event.
pub struct ConditionEvaluator<'a> {
    event: &'a Event,
    caps: &'static Capabilities,
    index: &'a dyn TrackedIndex,
}

impl<'a> ConditionEvaluator<'a> {
    /// Create an evaluator for `event`, querying `index` for tracked paths.
    pub fn new(event: &'a Event, index: &'a dyn TrackedIndex) -> Self {
        Self {
            event,
            caps: Capabilities::of(event.kind()),
            index,
        }
    }

    /// Whether every condition holds. Stops at the first false or error.
    pub fn all(&self, conditions: &[Condition]) -> Result<bool, ConditionError> {
        for condition in conditions {
            if !self.evaluate(condition)? {
                tracing::debug!(
                    condition = %condition.kind,
                    value = %condition.value,
                    "condition did not hold"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Evaluate a single condition.
    pub fn evaluate(&self, condition: &Condition) -> Result<bool, ConditionError> {
        if !self.caps.accepts(&condition.kind) {
            return Err(ConditionError::NotHandled {
                condition: condition.kind.to_string(),
                event: self.caps.kind,
            });
        }

        let common = self.event.common();
        let input = self.event.input();
        let value = condition.value.as_str();
        let cwd = common.cwd.as_str();

        use ConditionKind::*;
        let result = match &condition.kind {
            FileExists => exists(cwd, value, EntryKind::File),
            FileNotExists => !exists(cwd, value, EntryKind::File),
            DirExists => exists(cwd, value, EntryKind::Dir),
            DirNotExists => !exists(cwd, value, EntryKind::Dir),
            FileExistsRecursive => exists_recursive(cwd, value, EntryKind::File),
            FileNotExistsRecursive => !exists_recursive(cwd, value, EntryKind::File),
            DirExistsRecursive => exists_recursive(cwd, value, EntryKind::Dir),
            DirNotExistsRecursive => !exists_recursive(cwd, value, EntryKind::Dir),
            CwdIs => cwd == value,
            CwdIsNot => cwd != value,
            CwdContains => cwd.contains(value),
            CwdNotContains => !cwd.contains(value),
            PermissionModeIs => common.permission_mode == value,

            FileExtension => input
                .tool_input_str("file_path")
                .is_some_and(|path| has_extension(path, value)),
            CommandContains => input
                .tool_input_str("command")
                .is_some_and(|command| command.contains(value)),
            CommandStartsWith => input
                .tool_input_str("command")
                .is_some_and(|command| command.starts_with(value)),
            UrlStartsWith => input
                .tool_input_str("url")
                .is_some_and(|url| url.starts_with(value)),
            GitTrackedFileOperation => match input.tool_input_str("command") {
                Some(command) => {
                    is_git_tracked_operation(command, value, Path::new(cwd), self.index)?
                }
                None => false,
            },

            PromptRegex => {
                let regex = Regex::new(value).map_err(|e| ConditionError::InvalidRegex {
                    pattern: value.to_string(),
                    reason: e.to_string(),
                })?;
                regex.is_match(input.prompt().unwrap_or(""))
            }
            EveryNPrompts => {
                is_every_nth_prompt(value, &common.transcript_path, &common.session_id)?
            }

            ReasonIs => input.end_reason() == Some(value),

            Unknown(name) => {
                return Err(ConditionError::NotHandled {
                    condition: name.clone(),
                    event: self.caps.kind,
                })
            }
        };

        Ok(result)
    }
}

/// Whether `path` ends with extension `ext` (leading dot optional).
fn has_extension(path: &str, ext: &str) -> bool {
    let ext = ext.trim().trim_start_matches('.');
    if ext.is_empty() {
        return false;
    }
    path.ends_with(&format!(".{}", ext))
}
