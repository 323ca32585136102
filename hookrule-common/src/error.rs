//! Error types for the hookrule crate.

use thiserror::Error;

use crate::types::EventKind;

/// Main error type for hookrule operations.
#[derive(Debug, Error)]
pub enum HookError {
    /// IO error during stdin/stdout or config file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration could not be parsed.
    #[error("Config error in {path}: {message}")]
    Config {
        /// The configuration file path.
        path: String,
        /// The parser message.
        message: String,
    },

    /// Unknown or unsupported hook event name.
    #[error("Unknown hook event: {0}")]
    UnknownEvent(String),

    /// The decoded event is not the kind the caller asked for.
    #[error("Event mismatch: expected {expected}, got {actual}")]
    EventMismatch {
        /// The kind requested on the command line.
        expected: EventKind,
        /// The kind found in the input.
        actual: EventKind,
    },

    /// One or more rules failed to evaluate.
    #[error(transparent)]
    Rules(#[from] RuleErrors),
}

/// Errors raised by the command security guards.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// The command contains `<(` or `>(` outside of quotes.
    #[error("process substitution detected in command: {0}")]
    ProcessSubstitution(String),

    /// The command could not be split into words.
    #[error("failed to parse command '{command}': {reason}")]
    Unparseable {
        /// The offending command.
        command: String,
        /// Why splitting failed.
        reason: String,
    },

    /// The version-control index could not be queried.
    #[error("git query failed: {0}")]
    GitQuery(String),
}

/// Errors raised while evaluating a single condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConditionError {
    /// The condition type is unknown, or not accepted by this event kind.
    #[error("condition '{condition}' is not handled for {event}")]
    NotHandled {
        /// The condition type as written in the config.
        condition: String,
        /// The event kind being evaluated.
        event: EventKind,
    },

    /// `prompt_regex` value is not a valid regular expression.
    #[error("invalid regex '{pattern}': {reason}")]
    InvalidRegex {
        /// The pattern as written.
        pattern: String,
        /// The regex compiler message.
        reason: String,
    },

    /// `every_n_prompts` value is not a positive integer.
    #[error("invalid prompt interval '{0}': expected a positive integer")]
    InvalidInterval(String),

    /// The transcript log could not be read.
    #[error("failed to read transcript {path}: {reason}")]
    Transcript {
        /// The transcript path from the event.
        path: String,
        /// The IO failure.
        reason: String,
    },

    /// A security guard refused to evaluate the command.
    #[error(transparent)]
    Guard(#[from] GuardError),
}

/// Errors raised while turning an action into a directive.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Decision string outside the event kind's vocabulary.
    #[error("invalid decision '{value}' for {event}")]
    InvalidDecision {
        /// The decision string as rendered.
        value: String,
        /// The event kind being processed.
        event: EventKind,
    },

    /// Output action rendered no text for a kind that needs one.
    #[error("output action for {0} requires a non-empty message")]
    MessageRequired(EventKind),

    /// Action is missing the field its type needs.
    #[error("{action} action is missing '{field}'")]
    MissingField {
        /// The action type.
        action: &'static str,
        /// The missing field.
        field: &'static str,
    },
}

/// Any error that causes a rule to be skipped or its result to be distrusted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A condition failed to evaluate.
    #[error(transparent)]
    Condition(#[from] ConditionError),

    /// An action could not be interpreted.
    #[error(transparent)]
    Action(#[from] ActionError),
}

/// Errors collected across one dispatch pass, keyed by rule index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RuleErrors {
    entries: Vec<(usize, RuleError)>,
}

impl RuleErrors {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for the rule at `index`.
    pub fn push(&mut self, index: usize, error: impl Into<RuleError>) {
        self.entries.push((index, error.into()));
    }

    /// Whether no error was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded errors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over `(rule index, error)` pairs in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &(usize, RuleError)> {
        self.entries.iter()
    }
}

impl std::fmt::Display for RuleErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (index, error)) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "rule #{}: {}", index, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for RuleErrors {}
