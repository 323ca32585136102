//! Classifier for file operations on paths tracked by git.
//!
//! Flags commands like `rm tracked.txt` so a rule can steer the agent to
//! `git rm` instead. Commands led by `git` are exempt.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::GuardError;

use super::process_substitution::has_process_substitution;

/// Tokens that end the simple command whose operands are inspected.
const CONTROL_TOKENS: &[&str] = &["&&", "||", ";", "|", "&"];

/// Answers "is this path tracked?" for a working directory.
pub trait TrackedIndex {
    /// Whether `path` (relative to `cwd` or absolute) is in the index.
    fn is_tracked(&self, cwd: &Path, path: &str) -> Result<bool, GuardError>;
}

/// [`TrackedIndex`] backed by `git ls-files`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitIndex;

impl TrackedIndex for GitIndex {
    fn is_tracked(&self, cwd: &Path, path: &str) -> Result<bool, GuardError> {
        let status = Command::new("git")
            .arg("-C")
            .arg(cwd)
            .args(["ls-files", "--error-unmatch", "--", path])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| GuardError::GitQuery(e.to_string()))?;
        Ok(status.success())
    }
}

/// The file operands of `command` when its leading verb is one of `verbs`.
///
/// Returns `Ok(None)` when the command is led by `git` or by a verb not in
/// the pattern. Process substitution is rejected before tokenizing.
pub fn file_operands(command: &str, verbs: &str) -> Result<Option<Vec<String>>, GuardError> {
    if has_process_substitution(command) {
        return Err(GuardError::ProcessSubstitution(command.to_string()));
    }

    let words = shell_words::split(command).map_err(|e| GuardError::Unparseable {
        command: command.to_string(),
        reason: e.to_string(),
    })?;

    let Some((verb, rest)) = words.split_first() else {
        return Ok(None);
    };

    if verb == "git" {
        return Ok(None);
    }

    let wanted = verbs
        .split('|')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .any(|v| v == verb);
    if !wanted {
        return Ok(None);
    }

    let mut operands = Vec::new();
    let mut after_separator = false;
    for word in rest {
        if CONTROL_TOKENS.contains(&word.as_str()) {
            break;
        }
        if after_separator {
            operands.push(word.clone());
        } else if word == "--" {
            after_separator = true;
        } else if word.starts_with('-') && word.len() > 1 {
            continue;
        } else {
            operands.push(word.trim_end_matches(';').to_string());
        }
    }

    Ok(Some(operands))
}

/// Whether `command` runs one of `verbs` on a path tracked in `cwd`.
pub fn is_git_tracked_operation(
    command: &str,
    verbs: &str,
    cwd: &Path,
    index: &dyn TrackedIndex,
) -> Result<bool, GuardError> {
    let Some(operands) = file_operands(command, verbs)? else {
        return Ok(false);
    };

    for operand in operands.iter().filter(|o| !o.is_empty()) {
        if index.is_tracked(cwd, operand)? {
            tracing::debug!(operand = %operand, "operand is tracked by git");
            return Ok(true);
        }
    }
    Ok(false)
}
