//! `{dotted.path}` placeholder substitution against the raw event tree.
//!
//! Placeholders that cannot be resolved are left in the output verbatim, so
//! rendering is a no-op for unknown paths and rendering twice is stable.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*)\}").expect("placeholder regex is valid")
});

/// Replace every resolvable `{path}` in `template` with its value in `root`.
pub fn render(template: &str, root: &Value) -> String {
    if !template.contains('{') {
        return template.to_string();
    }
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            lookup(root, &caps[1])
                .and_then(scalar_text)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Walk `root` along a dot-separated path.
///
/// Objects are indexed by key and arrays by decimal index. Anything else,
/// including `null`, stops the walk.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
