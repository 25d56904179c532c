//! Canonical path utilities.
//!
//! Every path the engine stores or compares is canonical: absolute, with
//! `.`/`..` segments resolved lexically and without touching the
//! filesystem. Canonical paths are the identity keys used for the explored
//! set, result de-duplication, and sort tie-breaking.

use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;

/// Join path fragments and normalize the result into a canonical path.
///
/// Fragments are joined left to right; an absolute fragment resets the
/// accumulated base. The joined path is then absolutized against the
/// current working directory with `.` and `..` segments removed lexically.
/// The operation is idempotent: resolving an already-canonical path returns
/// it unchanged.
///
/// Malformed input degrades instead of failing: blank fragments are
/// skipped, and an empty fragment list resolves to the current working
/// directory. This keeps the traversal engine resilient to empty path
/// fragments surfaced by misbehaving providers.
///
/// # Examples
///
/// ```rust
/// use dirscout_core::path;
///
/// let p = path::resolve(["/var/log", "..", "tmp", "./cache"]);
/// assert_eq!(p, std::path::PathBuf::from("/var/tmp/cache"));
/// ```
pub fn resolve<I, S>(fragments: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let mut joined = PathBuf::new();
    for fragment in fragments {
        let fragment = fragment.as_ref();
        if fragment.as_os_str().is_empty() {
            continue;
        }
        if fragment.is_absolute() {
            joined = fragment.to_path_buf();
        } else {
            joined.push(fragment);
        }
    }

    if joined.as_os_str().is_empty() {
        joined = PathBuf::from(".");
    }

    match joined.absolutize() {
        Ok(resolved) => resolved.into_owned(),
        // The cwd is unavailable; fall back to a purely lexical cleanup
        // rooted at the filesystem root.
        Err(_) => normalize_from_root(&joined),
    }
}

/// Return the final component of a path, if it has one.
///
/// Root-like paths (`/`) and empty paths have no base name.
#[must_use]
pub fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|name| name.to_string_lossy().into_owned())
}

/// Return the path without its final component, if any.
#[must_use]
pub fn parent_dir(path: &Path) -> Option<PathBuf> {
    path.parent().map(Path::to_path_buf)
}

/// Return the extension of the final component, without the leading dot.
#[must_use]
pub fn extension(path: &Path) -> Option<String> {
    path.extension().map(|ext| ext.to_string_lossy().into_owned())
}

/// Lexical normalization anchored at the root, used when the cwd cannot be
/// determined. `..` at the root is dropped rather than escaping it.
fn normalize_from_root(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut normalized = PathBuf::from("/");
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized = PathBuf::from(prefix.as_os_str()),
            Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(segment) => normalized.push(segment),
        }
    }
    normalized
}
