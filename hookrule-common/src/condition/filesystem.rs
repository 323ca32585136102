//! Filesystem existence predicates used by the common conditions.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// What kind of entry a predicate looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// Resolve a condition path against the event's working directory.
pub fn resolve(cwd: &str, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(cwd).join(path)
    }
}

/// Whether an entry of `kind` exists at `value` (relative to `cwd`).
pub fn exists(cwd: &str, value: &str, kind: EntryKind) -> bool {
    let path = resolve(cwd, value);
    match kind {
        EntryKind::File => path.is_file(),
        EntryKind::Dir => path.is_dir(),
    }
}

/// Whether an entry of `kind` named `value` exists anywhere below `cwd`.
///
/// An entry matches when its file name equals `value` or its path relative
/// to `cwd` ends with `value`. `.git` directories are not descended.
pub fn exists_recursive(cwd: &str, value: &str, kind: EntryKind) -> bool {
    let root = Path::new(cwd);
    let wanted = Path::new(value);

    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git")
        .filter_map(Result::ok)
        .filter(|entry| match kind {
            EntryKind::File => entry.file_type().is_file(),
            EntryKind::Dir => entry.file_type().is_dir(),
        })
        .any(|entry| {
            entry.file_name() == wanted.as_os_str()
                || entry
                    .path()
                    .strip_prefix(root)
                    .map(|rel| rel.ends_with(wanted))
                    .unwrap_or(false)
        })
}
