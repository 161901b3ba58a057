//! Walk result model
//!
//! The walker produces a `WalkReport`: the accepted files in traversal order,
//! plus a structured record of everything it skipped and why.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One accepted file, with its path exactly as the walk produced it
/// (root argument joined with the entry's relative path, not normalized)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: PathBuf,
}

impl FileRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Why an entry did not make it into the result list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Directory matched a pattern; its subtree was never visited
    Pruned { pattern: String },
    /// File matched a pattern
    Excluded { pattern: String },
    /// File content is not valid UTF-8 (or could not be read)
    Binary,
    /// Not a regular file (FIFO, socket, device, link to a directory); never opened
    Special,
    /// Entry could not be stat'd or listed during traversal
    Unreadable { message: String },
    /// The root argument itself could not be walked
    RootFailed { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Pruned { pattern } => write!(f, "pruned (matched {})", pattern),
            SkipReason::Excluded { pattern } => write!(f, "excluded (matched {})", pattern),
            SkipReason::Binary => write!(f, "binary content"),
            SkipReason::Special => write!(f, "not a regular file"),
            SkipReason::Unreadable { message } => write!(f, "unreadable: {}", message),
            SkipReason::RootFailed { message } => write!(f, "root failed: {}", message),
        }
    }
}

/// A skipped entry and the reason it was skipped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    pub path: PathBuf,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Everything a walk produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkReport {
    /// Directory the `.exclude` file was looked up in
    pub project_root: PathBuf,

    /// Merged pattern list (caller patterns first, then file patterns)
    pub patterns: Vec<String>,

    /// Accepted files, concatenated per root in root-argument order
    pub files: Vec<FileRecord>,

    /// Skipped entries, in the order they were encountered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedEntry>,
}

impl WalkReport {
    pub fn new(project_root: PathBuf, patterns: Vec<String>) -> Self {
        Self {
            project_root,
            patterns,
            files: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn accept(&mut self, path: impl Into<PathBuf>) {
        self.files.push(FileRecord::new(path));
    }

    pub fn skip(&mut self, path: impl Into<PathBuf>, reason: SkipReason) {
        self.skipped.push(SkippedEntry {
            path: path.into(),
            reason,
        });
    }

    /// Accepted paths, in result order
    #[cfg(test)]
    pub fn paths(&self) -> Vec<&Path> {
        self.files.iter().map(FileRecord::path).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_accept_preserves_order() {
        let mut report = WalkReport::new(PathBuf::from("."), Vec::new());
        report.accept("b.txt");
        report.accept("a.txt");
        assert_eq!(report.paths(), vec![Path::new("b.txt"), Path::new("a.txt")]);
        assert_eq!(report.len(), 2);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::Pruned {
            pattern: "build".to_string(),
        };
        assert_eq!(reason.to_string(), "pruned (matched build)");
        assert_eq!(SkipReason::Binary.to_string(), "binary content");
        assert_eq!(SkipReason::Special.to_string(), "not a regular file");
    }

    #[test]
    fn test_skipped_entry_serializes_flat() {
        let entry = SkippedEntry {
            path: PathBuf::from("logs/app.log"),
            reason: SkipReason::Excluded {
                pattern: "**/*.log".to_string(),
            },
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["path"], "logs/app.log");
        assert_eq!(value["reason"], "excluded");
        assert_eq!(value["pattern"], "**/*.log");
    }

    #[test]
    fn test_empty_report_omits_skipped() {
        let report = WalkReport::new(PathBuf::from("/p"), vec!["x".to_string()]);
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("skipped").is_none());
        assert!(report.is_empty());
    }
}
