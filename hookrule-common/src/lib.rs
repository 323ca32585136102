//! hookrule common - rule-driven hook dispatching core.
//!
//! This crate decodes host events, evaluates configured rules against them,
//! runs the matching actions, and merges the results into one output for the
//! event kind.

pub mod action;
pub mod capability;
pub mod condition;
pub mod directive;
pub mod dispatcher;
pub mod error;
pub mod guard;
pub mod matcher;
pub mod merge;
pub mod rules;
pub mod template;
pub mod types;
pub mod validate;

pub use capability::{Capabilities, Decision, Vocabulary};
pub use directive::{Directive, ExitRequest};
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use error::{ActionError, ConditionError, GuardError, HookError, RuleError, RuleErrors};
pub use rules::{Action, Condition, Rule, RuleSet};
pub use types::{Event, EventInput, EventKind, HookOutput};
pub use validate::{validate, ConfigIssue};
