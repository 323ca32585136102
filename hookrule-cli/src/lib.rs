//! hookrule - rule-driven hook dispatcher.
//!
//! The binary reads one event from stdin and writes one JSON decision to
//! stdout. This library exposes the pieces the binary is made of so they can
//! be driven from tests.
//!
//! ```rust,no_run
//! use hookrule::hook::{process, Emission};
//! use hookrule_common::{Dispatcher, RuleSet};
//!
//! let rules = RuleSet::discover(None).unwrap();
//! let dispatcher = Dispatcher::new(rules);
//! let input = r#"{"session_id":"s","transcript_path":"/tmp/t","cwd":"/","hook_event_name":"Stop"}"#;
//! if let Emission::Json(json) = process(input, &dispatcher, None).unwrap() {
//!     println!("{}", json);
//! }
//! ```

pub mod check;
pub mod cli;
pub mod hook;
pub mod logging;

pub use cli::{Cli, Commands};
