use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::Result;
use crate::error::IoContext;

/// Returns `path` as an absolute path without `.` or `..` components.
///
/// Relative paths are resolved against the current directory, symlinks are not followed.
pub fn absolute_clean(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_io_context(|| format!("could not make {:?} absolute", path))?;
    Ok(absolute.clean())
}

/// Returns `path` relative to `base`.
///
/// # Errors
///
/// This function will return `None` if `base` was not a prefix of `path`.
pub fn relative_path(path: &Path, base: &Path) -> Option<PathBuf> {
    path.strip_prefix(base).map(PathBuf::from).ok()
}

/// Returns the path divided by forward slashes.
pub fn format_path(path: &Path) -> OsString {
    let mut formatted = OsString::new();
    let mut prev: &OsStr = OsStr::new("");
    for (i, p) in path.iter().enumerate() {
        if i != 0 && prev != "/" {
            // doing this to avoid placing a forward slash at the end or when the path before is a
            // forward slash
            formatted.push("/");
        }
        formatted.push(p);
        prev = p;
    }
    formatted
}
