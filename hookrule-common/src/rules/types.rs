//! Rule types: matcher, conditions and actions as written in the config.

use serde::{Deserialize, Serialize};

/// Which family a condition belongs to.
///
/// Event kinds accept the common family plus a fixed subset of the others;
/// see [`crate::capability::Capabilities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionGroup {
    /// Filesystem, cwd and permission-mode predicates.
    Common,
    /// Predicates over `tool_input`.
    Tool,
    /// Predicates over the submitted prompt.
    Prompt,
    /// Predicates over the session termination reason.
    SessionEnd,
}

/// The named predicate a condition applies.
///
/// Unknown names are kept as [`ConditionKind::Unknown`] so that evaluation
/// can report them as "not handled" instead of failing to load the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionKind {
    FileExists,
    FileExistsRecursive,
    FileNotExists,
    FileNotExistsRecursive,
    DirExists,
    DirExistsRecursive,
    DirNotExists,
    DirNotExistsRecursive,
    CwdIs,
    CwdIsNot,
    CwdContains,
    CwdNotContains,
    PermissionModeIs,
    FileExtension,
    CommandContains,
    CommandStartsWith,
    UrlStartsWith,
    GitTrackedFileOperation,
    PromptRegex,
    EveryNPrompts,
    ReasonIs,
    /// A name no evaluator knows.
    Unknown(String),
}

impl ConditionKind {
    /// The config spelling of this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ConditionKind::FileExists => "file_exists",
            ConditionKind::FileExistsRecursive => "file_exists_recursive",
            ConditionKind::FileNotExists => "file_not_exists",
            ConditionKind::FileNotExistsRecursive => "file_not_exists_recursive",
            ConditionKind::DirExists => "dir_exists",
            ConditionKind::DirExistsRecursive => "dir_exists_recursive",
            ConditionKind::DirNotExists => "dir_not_exists",
            ConditionKind::DirNotExistsRecursive => "dir_not_exists_recursive",
            ConditionKind::CwdIs => "cwd_is",
            ConditionKind::CwdIsNot => "cwd_is_not",
            ConditionKind::CwdContains => "cwd_contains",
            ConditionKind::CwdNotContains => "cwd_not_contains",
            ConditionKind::PermissionModeIs => "permission_mode_is",
            ConditionKind::FileExtension => "file_extension",
            ConditionKind::CommandContains => "command_contains",
            ConditionKind::CommandStartsWith => "command_starts_with",
            ConditionKind::UrlStartsWith => "url_starts_with",
            ConditionKind::GitTrackedFileOperation => "git_tracked_file_operation",
            ConditionKind::PromptRegex => "prompt_regex",
            ConditionKind::EveryNPrompts => "every_n_prompts",
            ConditionKind::ReasonIs => "reason_is",
            ConditionKind::Unknown(name) => name,
        }
    }

    /// The family this kind belongs to, `None` for unknown names.
    pub fn group(&self) -> Option<ConditionGroup> {
        use ConditionKind::*;
        match self {
            FileExists | FileExistsRecursive | FileNotExists | FileNotExistsRecursive
            | DirExists | DirExistsRecursive | DirNotExists | DirNotExistsRecursive | CwdIs
            | CwdIsNot | CwdContains | CwdNotContains | PermissionModeIs => {
                Some(ConditionGroup::Common)
            }
            FileExtension | CommandContains | CommandStartsWith | UrlStartsWith
            | GitTrackedFileOperation => Some(ConditionGroup::Tool),
            PromptRegex | EveryNPrompts => Some(ConditionGroup::Prompt),
            ReasonIs => Some(ConditionGroup::SessionEnd),
            Unknown(_) => None,
        }
    }
}

impl From<String> for ConditionKind {
    fn from(name: String) -> Self {
        use ConditionKind::*;
        match name.as_str() {
            "file_exists" => FileExists,
            "file_exists_recursive" => FileExistsRecursive,
            "file_not_exists" => FileNotExists,
            "file_not_exists_recursive" => FileNotExistsRecursive,
            "dir_exists" => DirExists,
            "dir_exists_recursive" => DirExistsRecursive,
            "dir_not_exists" => DirNotExists,
            "dir_not_exists_recursive" => DirNotExistsRecursive,
            "cwd_is" => CwdIs,
            "cwd_is_not" => CwdIsNot,
            "cwd_contains" => CwdContains,
            "cwd_not_contains" => CwdNotContains,
            "permission_mode_is" => PermissionModeIs,
            "file_extension" => FileExtension,
            "command_contains" => CommandContains,
            "command_starts_with" => CommandStartsWith,
            "url_starts_with" => UrlStartsWith,
            "git_tracked_file_operation" => GitTrackedFileOperation,
            "prompt_regex" => PromptRegex,
            "every_n_prompts" => EveryNPrompts,
            "reason_is" => ReasonIs,
            _ => Unknown(name),
        }
    }
}

impl From<ConditionKind> for String {
    fn from(kind: ConditionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named predicate with its argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Which predicate to apply.
    #[serde(rename = "type")]
    pub kind: ConditionKind,

    /// The predicate argument (path, substring, regex, N, ...).
    #[serde(default)]
    pub value: String,
}

impl Condition {
    /// Convenience constructor.
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: ConditionKind::from(kind.into()),
            value: value.into(),
        }
    }
}

/// Run a shell command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandAction {
    /// The command template, run with `sh -c`.
    #[serde(default)]
    pub command: String,

    /// Pipe the raw event JSON to the command's stdin.
    #[serde(default)]
    pub use_stdin: bool,
}

/// Render a message and carry decision fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputAction {
    /// Message template.
    #[serde(default)]
    pub message: String,

    /// Generic decision (`block`, `allow`, `deny`, `ask`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,

    /// PreToolUse decision (`allow`, `deny`, `ask`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_decision: Option<String>,

    /// PermissionRequest decision (`allow`, `deny`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,

    /// Reason template accompanying the decision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Additional context template for the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,

    /// System message template for the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_message: Option<String>,

    /// Replacement tool input, kept only while the decision is allow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_input: Option<serde_json::Value>,

    /// Interrupt the agent, kept only while the decision is deny.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupt: Option<bool>,

    /// Explicit continuation flag.
    #[serde(default, rename = "continue", skip_serializing_if = "Option::is_none")]
    pub continue_execution: Option<bool>,

    /// Legacy: exit the process with this status instead of emitting JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_status: Option<i32>,
}

/// An action executed when a rule applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Run a shell command.
    Command(CommandAction),
    /// Render a message.
    Output(OutputAction),
}

impl Action {
    /// Build a command action.
    pub fn command(command: impl Into<String>) -> Self {
        Action::Command(CommandAction {
            command: command.into(),
            use_stdin: false,
        })
    }

    /// Build an output action with only a message.
    pub fn output(message: impl Into<String>) -> Self {
        Action::Output(OutputAction {
            message: message.into(),
            ..Default::default()
        })
    }

    /// Short name for logging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Command(_) => "command",
            Action::Output(_) => "output",
        }
    }
}

/// A configured matcher + conditions + actions for one event kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Pipe-separated substrings matched against the event's subject.
    #[serde(default)]
    pub matcher: String,

    /// All must hold for the actions to run.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Executed in order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Rule {
    /// A rule that matches everything and runs the given actions.
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            matcher: String::new(),
            conditions: Vec::new(),
            actions,
        }
    }

    /// Set the matcher pattern.
    pub fn with_matcher(mut self, matcher: impl Into<String>) -> Self {
        self.matcher = matcher.into();
        self
    }

    /// Append a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }
}
