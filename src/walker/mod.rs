//! Tree walker
//!
//! Walks one or more roots depth-first and returns the text files that survive
//! exclude-pattern matching and binary sniffing:
//! - patterns come from the caller, followed by the project root's `.exclude`
//! - every root is its own base: patterns see paths relative to the root
//!   being walked, '/'-separated
//! - a directory that matches is pruned; nothing beneath it is visited
//! - per-entry and per-root failures are logged and recorded, never fatal

pub mod patterns;
pub mod root;
pub mod sniff;

use std::fs::{self, FileType};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::core::model::{SkipReason, WalkReport};
use crate::core::paths::make_relative;

pub use patterns::{ExcludeSet, PATTERN_FILE_NAME};
pub use root::resolve_project_root;
pub use sniff::is_binary;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("could not determine a usable project root: {0}")]
    NoUsableRoot(#[source] std::io::Error),
}

/// Walk configuration
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Caller-supplied patterns (e.g. `--exclude` flags); merged ahead of the
    /// pattern file's
    pub extra_patterns: Vec<String>,

    /// Directory to read the pattern file from. Discovered from the working
    /// directory when `None`.
    pub project_root: Option<PathBuf>,

    /// Pattern file name inside the project root
    pub pattern_file_name: String,

    /// Follow symbolic links while descending
    pub follow_links: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            extra_patterns: Vec::new(),
            project_root: None,
            pattern_file_name: PATTERN_FILE_NAME.to_string(),
            follow_links: false,
        }
    }
}

impl WalkOptions {
    pub fn with_patterns(patterns: Vec<String>) -> Self {
        Self {
            extra_patterns: patterns,
            ..Default::default()
        }
    }

    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }
}

/// Walk every root in order and collect the accepted files.
///
/// Fails only when no project root can be determined at all.
pub fn walk_files<P: AsRef<Path>>(
    roots: &[P],
    options: &WalkOptions,
) -> Result<WalkReport, WalkError> {
    let project_root = match &options.project_root {
        Some(root) => root.clone(),
        None => resolve_project_root()?,
    };

    let mut merged = options.extra_patterns.clone();
    merged.extend(patterns::load_pattern_file(
        &project_root.join(&options.pattern_file_name),
    ));
    let excludes = ExcludeSet::new(merged);
    if excludes.is_empty() {
        debug!("No exclude patterns in effect");
    }

    let mut report = WalkReport::new(project_root, excludes.patterns().to_vec());

    for root in roots {
        WalkContext::new(root.as_ref(), &excludes).walk(options.follow_links, &mut report);
    }

    Ok(report)
}

/// Per-root walk state
struct WalkContext<'a> {
    root: &'a Path,
    excludes: &'a ExcludeSet,
}

impl<'a> WalkContext<'a> {
    fn new(root: &'a Path, excludes: &'a ExcludeSet) -> Self {
        Self { root, excludes }
    }

    fn walk(&self, follow_links: bool, report: &mut WalkReport) {
        debug!(
            "Walking {} ({} pattern(s))",
            crate::core::paths::absolute(self.root).display(),
            self.excludes.patterns().len()
        );

        let mut entries = WalkDir::new(self.root).follow_links(follow_links).into_iter();

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().unwrap_or(self.root).to_path_buf();
                    if e.depth() == 0 {
                        warn!("Error walking {}: {}", self.root.display(), e);
                        report.skip(path, SkipReason::RootFailed { message: e.to_string() });
                    } else {
                        debug!("Skipping unreadable entry {}: {}", path.display(), e);
                        report.skip(path, SkipReason::Unreadable { message: e.to_string() });
                    }
                    continue;
                }
            };

            let path = entry.path();
            let is_dir = entry.file_type().is_dir();

            // The root itself is never matched against patterns
            // A root given as a link to a directory is still descended into
            if entry.depth() == 0 {
                if !is_dir && !path.is_dir() {
                    self.consider_file(path, entry.file_type(), report);
                }
                continue;
            }

            // Entries always live under the root they were walked from
            let relative = match make_relative(path, self.root) {
                Some(r) => r,
                None => continue,
            };

            if is_dir {
                if let Some(pattern) = self.excludes.first_dir_match(&relative) {
                    debug!("Skipping directory: {} (matched {})", relative, pattern);
                    report.skip(
                        path,
                        SkipReason::Pruned {
                            pattern: pattern.to_string(),
                        },
                    );
                    entries.skip_current_dir();
                }
                continue;
            }

            if let Some(pattern) = self.excludes.first_match(&relative) {
                debug!("Excluding file: {} (matched {})", relative, pattern);
                report.skip(
                    path,
                    SkipReason::Excluded {
                        pattern: pattern.to_string(),
                    },
                );
                continue;
            }

            self.consider_file(path, entry.file_type(), report);
        }
    }

    /// Sniff a non-directory entry. Only regular files (or links to them) are
    /// opened; opening a FIFO with no writer would block forever.
    fn consider_file(&self, path: &Path, file_type: FileType, report: &mut WalkReport) {
        let regular = if file_type.is_symlink() {
            match fs::metadata(path) {
                Ok(meta) => meta.is_file(),
                Err(e) => {
                    debug!("Skipping dangling link {}: {}", path.display(), e);
                    report.skip(path, SkipReason::Unreadable { message: e.to_string() });
                    return;
                }
            }
        } else {
            file_type.is_file()
        };

        if !regular {
            debug!("Skipping special file: {}", path.display());
            report.skip(path, SkipReason::Special);
        } else if is_binary(path) {
            debug!("Skipping binary file: {}", path.display());
            report.skip(path, SkipReason::Binary);
        } else {
            report.accept(path);
        }
    }
}
