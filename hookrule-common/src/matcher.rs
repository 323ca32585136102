//! Rule matcher: pipe-separated substring alternatives.

/// Check a matcher pattern against a subject string.
///
/// An empty pattern matches everything. Otherwise the pattern is split on
/// `|`, each alternative is trimmed, and the subject matches if it contains
/// any non-empty alternative. Matching is case-sensitive and unanchored.
pub fn matches(pattern: &str, subject: &str) -> bool {
    if pattern.trim().is_empty() {
        return true;
    }
    pattern
        .split('|')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .any(|alt| subject.contains(alt))
}
