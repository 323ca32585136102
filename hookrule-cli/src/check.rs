//! `hookrule check`: validate the configuration.

use std::io::Write;
use std::path::Path;

use hookrule_common::rules::{resolve_config_path, ConfigLocation};
use hookrule_common::{validate, HookError, RuleSet};

/// Load the config, print every issue, and return the exit code.
///
/// Returns 0 when the config is clean, 1 when any rule would fail at runtime.
pub fn run_check(config: Option<&Path>, out: &mut impl Write) -> Result<i32, HookError> {
    match resolve_config_path(config) {
        ConfigLocation::Explicit(path) | ConfigLocation::Default(path) => {
            writeln!(out, "config: {}", path.display())?;
        }
        ConfigLocation::None => writeln!(out, "config: none")?,
    }

    let rules = RuleSet::discover(config)?;
    let issues = validate(&rules);

    for issue in &issues {
        writeln!(out, "error: {}", issue)?;
    }

    if issues.is_empty() {
        writeln!(out, "ok: {} rule(s)", rules.len())?;
        Ok(0)
    } else {
        writeln!(out, "{} problem(s) in {} rule(s)", issues.len(), rules.len())?;
        Ok(1)
    }
}
