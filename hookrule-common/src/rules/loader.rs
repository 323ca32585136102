//! Rule set loading from YAML.
//!
//! The config file has one top-level key per event kind, each holding an
//! ordered list of rules:
//!
//! ```yaml
//! PreToolUse:
//!   - matcher: "Bash"
//!     conditions:
//!       - type: git_tracked_file_operation
//!         value: "rm|mv"
//!     actions:
//!       - type: output
//!         message: "Use git rm / git mv for tracked files"
//!         permission_decision: deny
//! ```
//!
//! Location precedence:
//! 1. An explicit path (the `--config` flag)
//! 2. The `HOOKRULE_CONFIG` environment variable
//! 3. `<user config dir>/hookrule/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HookError;
use crate::types::EventKind;

use super::types::Rule;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "HOOKRULE_CONFIG";

/// Directory under the user config dir.
const CONFIG_DIR_NAME: &str = "hookrule";

/// File name inside [`CONFIG_DIR_NAME`].
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Ordered rules for every event kind.
///
/// Loaded once by the entry point and passed down read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct RuleSet {
    #[serde(default)]
    pub session_start: Vec<Rule>,
    #[serde(default)]
    pub user_prompt_submit: Vec<Rule>,
    #[serde(default)]
    pub pre_tool_use: Vec<Rule>,
    #[serde(default)]
    pub permission_request: Vec<Rule>,
    #[serde(default)]
    pub post_tool_use: Vec<Rule>,
    #[serde(default)]
    pub notification: Vec<Rule>,
    #[serde(default)]
    pub stop: Vec<Rule>,
    #[serde(default)]
    pub subagent_start: Vec<Rule>,
    #[serde(default)]
    pub subagent_stop: Vec<Rule>,
    #[serde(default)]
    pub pre_compact: Vec<Rule>,
    #[serde(default)]
    pub session_end: Vec<Rule>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules configured for `kind`, in declared order.
    pub fn rules_for(&self, kind: EventKind) -> &[Rule] {
        match kind {
            EventKind::SessionStart => &self.session_start,
            EventKind::UserPromptSubmit => &self.user_prompt_submit,
            EventKind::PreToolUse => &self.pre_tool_use,
            EventKind::PermissionRequest => &self.permission_request,
            EventKind::PostToolUse => &self.post_tool_use,
            EventKind::Notification => &self.notification,
            EventKind::Stop => &self.stop,
            EventKind::SubagentStart => &self.subagent_start,
            EventKind::SubagentStop => &self.subagent_stop,
            EventKind::PreCompact => &self.pre_compact,
            EventKind::SessionEnd => &self.session_end,
        }
    }

    /// Mutable access, used by builders and tests.
    pub fn rules_for_mut(&mut self, kind: EventKind) -> &mut Vec<Rule> {
        match kind {
            EventKind::SessionStart => &mut self.session_start,
            EventKind::UserPromptSubmit => &mut self.user_prompt_submit,
            EventKind::PreToolUse => &mut self.pre_tool_use,
            EventKind::PermissionRequest => &mut self.permission_request,
            EventKind::PostToolUse => &mut self.post_tool_use,
            EventKind::Notification => &mut self.notification,
            EventKind::Stop => &mut self.stop,
            EventKind::SubagentStart => &mut self.subagent_start,
            EventKind::SubagentStop => &mut self.subagent_stop,
            EventKind::PreCompact => &mut self.pre_compact,
            EventKind::SessionEnd => &mut self.session_end,
        }
    }

    /// Add a rule for `kind`, builder style.
    pub fn with_rule(mut self, kind: EventKind, rule: Rule) -> Self {
        self.rules_for_mut(kind).push(rule);
        self
    }

    /// Total number of rules across all kinds.
    pub fn len(&self) -> usize {
        EventKind::ALL
            .iter()
            .map(|kind| self.rules_for(*kind).len())
            .sum()
    }

    /// Whether no rule is configured at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse a rule set from YAML text. `origin` is used in error messages.
    pub fn from_yaml(yaml: &str, origin: &str) -> Result<Self, HookError> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| HookError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a rule set from a file.
    pub fn load(path: &Path) -> Result<Self, HookError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Resolve the config location and load it.
    ///
    /// A missing file at the default location is an empty rule set; a
    /// missing file that was asked for explicitly is an error.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, HookError> {
        match resolve_config_path(explicit) {
            ConfigLocation::Explicit(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load(&path)
            }
            ConfigLocation::Default(path) => {
                if path.is_file() {
                    tracing::debug!("Loading default config from {}", path.display());
                    Self::load(&path)
                } else {
                    tracing::debug!("No config at {}, using empty rule set", path.display());
                    Ok(Self::new())
                }
            }
            ConfigLocation::None => {
                tracing::warn!("No config directory available, using empty rule set");
                Ok(Self::new())
            }
        }
    }
}

/// Where the config file is expected to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    /// Named by flag or environment; must exist.
    Explicit(PathBuf),
    /// The per-user default; may be absent.
    Default(PathBuf),
    /// No user config directory on this platform.
    None,
}

/// Apply the location precedence without touching the file.
pub fn resolve_config_path(explicit: Option<&Path>) -> ConfigLocation {
    if let Some(path) = explicit {
        return ConfigLocation::Explicit(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return ConfigLocation::Explicit(PathBuf::from(path));
        }
    }
    match dirs::config_dir() {
        Some(dir) => ConfigLocation::Default(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)),
        None => ConfigLocation::None,
    }
}
