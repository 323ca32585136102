//! Security guards applied to shell commands before they are reasoned about.

mod git_tracked;
mod process_substitution;

pub use git_tracked::{file_operands, is_git_tracked_operation, GitIndex, TrackedIndex};
pub use process_substitution::has_process_substitution;
