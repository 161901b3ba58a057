//! Path normalization utilities
//!
//! Exclude patterns are always matched against '/'-separated paths relative to
//! the root being walked, whatever the host separator is.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the base directory
pub fn make_relative(path: &Path, base: &Path) -> Option<String> {
    path.strip_prefix(base).ok().map(normalize_path)
}

/// Absolute form of `path`, without resolving symlinks.
///
/// Falls back to the path as given when the working directory is unavailable.
pub fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
