//! Exclude patterns
//!
//! Loads the `.exclude` file and compiles the merged pattern list into a
//! matcher. Patterns are globs matched against '/'-separated paths relative to
//! the walked root: `*` stops at '/', `**` crosses it.

use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the per-directory ignore file
pub const PATTERN_FILE_NAME: &str = ".exclude";

/// Load patterns from an ignore file. A missing file yields no patterns.
pub fn load_pattern_file(path: &Path) -> Vec<String> {
    match fs::read(path) {
        Ok(bytes) => {
            let patterns = parse_patterns(&String::from_utf8_lossy(&bytes));
            debug!(
                "Loaded {} exclude pattern(s) from {}",
                patterns.len(),
                path.display()
            );
            patterns
        }
        Err(e) => {
            debug!("No exclude file at {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Parse ignore-file text: one pattern per line, trimmed, skipping blank
/// lines and `#` comments. File order is preserved; duplicates are kept.
pub fn parse_patterns(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Compiled, read-only exclude pattern list
#[derive(Debug, Clone, Default)]
pub struct ExcludeSet {
    patterns: Vec<String>,
    // None for patterns that failed to compile; those never match
    matchers: Vec<Option<GlobMatcher>>,
}

impl ExcludeSet {
    pub fn new(patterns: Vec<String>) -> Self {
        let matchers = patterns
            .iter()
            .map(|pattern| match compile(pattern) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e);
                    None
                }
            })
            .collect();

        Self { patterns, matchers }
    }

    /// All patterns, including ones that failed to compile
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// First pattern (in list order) matching a file's relative path
    pub fn first_match(&self, rel_path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .zip(&self.matchers)
            .find(|(_, matcher)| {
                matcher
                    .as_ref()
                    .map(|m| m.is_match(rel_path))
                    .unwrap_or(false)
            })
            .map(|(pattern, _)| pattern.as_str())
    }

    /// First pattern matching a directory's relative path.
    ///
    /// The directory is tried both bare (`build`) and with a trailing slash
    /// (`build/`), so `dir/**` style patterns prune the directory itself.
    pub fn first_dir_match(&self, rel_path: &str) -> Option<&str> {
        let with_slash = format!("{}/", rel_path);
        self.patterns
            .iter()
            .zip(&self.matchers)
            .find(|(_, matcher)| {
                matcher
                    .as_ref()
                    .map(|m| m.is_match(rel_path) || m.is_match(&with_slash))
                    .unwrap_or(false)
            })
            .map(|(pattern, _)| pattern.as_str())
    }
}

fn compile(pattern: &str) -> Result<GlobMatcher, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
}
