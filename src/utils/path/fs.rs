//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `resolve_reference` - resolve a literal path relative to the file that mentions it
//! - `is_contained_relative` - check a destination cannot escape its root

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to the path as given when canonicalization fails,
/// typically because it does not exist.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve a path literal found in `current_file`.
///
/// Values starting with `/` are taken as-is. Anything else is joined onto
/// the directory of `current_file`. The result is then normalized; a path
/// that cannot be canonicalized is returned un-normalized so the caller's
/// existence check fails on it naturally.
///
/// # Example
/// ```ignore
/// // <tmp>/src/index.php mentions "../resources/styles.css"
/// let path = resolve_reference(Path::new("/tmp/src/index.php"), "../resources/styles.css");
/// assert_eq!(path, PathBuf::from("/tmp/resources/styles.css"));
/// ```
pub fn resolve_reference(current_file: &Path, value: &str) -> PathBuf {
    let joined = if value.starts_with('/') {
        PathBuf::from(value)
    } else {
        let dir = match current_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        dir.join(value)
    };
    normalize_path(&joined)
}

/// Check that `path` is relative and never climbs above its base.
///
/// `img/logo.png` and `./a/../b` pass; `/etc/passwd`, `../x` and
/// `a/../../x` do not.
pub fn is_contained_relative(path: &Path) -> bool {
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    true
}
