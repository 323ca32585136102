//! Rule configuration for hookrule.
//!
//! Rules are declared per event kind in a YAML file and consumed read-only
//! by the dispatcher.

mod loader;
mod types;

pub use loader::{resolve_config_path, ConfigLocation, RuleSet, CONFIG_ENV_VAR};
pub use types::{
    Action, CommandAction, Condition, ConditionGroup, ConditionKind, OutputAction, Rule,
};
