//! Documentation sessions
//!
//! A session is a timestamped directory under the output directory:
//!
//! ```text
//! output/20250101_120000/
//!   00000_prompt.txt        file content sent in step 0
//!   00000_response.txt      documentation after step 0
//!   ...
//!   _file-tree.txt          files in the session
//!   _documentation.md       documentation after the last step
//!   _review_documentation.md
//! ```

pub mod document;
pub mod prompts;

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::model::FileRecord;
use crate::core::paths::normalize_path;
use crate::core::tokenizer::TokenBudget;

pub use document::{build_documentation, review_session};

pub const DOCUMENTATION_FILE: &str = "_documentation.md";
pub const REVIEW_FILE: &str = "_review_documentation.md";
pub const FILE_TREE_FILE: &str = "_file-tree.txt";
pub const RESPONSE_PLACEHOLDER: &str = "[placeholder for response]";

/// One file queued for the documentation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEntry {
    pub index: usize,
    pub source: PathBuf,
}

impl SessionEntry {
    /// Label shown to the model and in file lists
    pub fn label(&self) -> String {
        normalize_path(&self.source)
    }
}

#[derive(Debug)]
pub struct Session {
    dir: PathBuf,
    entries: Vec<SessionEntry>,
}

impl Session {
    /// Create a new session directory named after the current local time
    pub fn create(output_dir: &Path) -> Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        Self::create_at(output_dir.join(timestamp))
    }

    /// Create (or reuse) a session at an explicit directory
    pub fn create_at(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create session directory {}", dir.display()))?;
        Ok(Self {
            dir,
            entries: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[SessionEntry] {
        &self.entries
    }

    pub fn prompt_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{:05}_prompt.txt", index))
    }

    pub fn response_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{:05}_response.txt", index))
    }

    pub fn documentation_path(&self) -> PathBuf {
        self.dir.join(DOCUMENTATION_FILE)
    }

    pub fn file_tree_path(&self) -> PathBuf {
        self.dir.join(FILE_TREE_FILE)
    }

    /// Write one prompt file and a placeholder response per readable file.
    ///
    /// Files that cannot be read are logged and left out; indices stay
    /// aligned with the original file order. Returns the number queued.
    pub fn queue_files(&mut self, files: &[FileRecord], model: &str) -> Result<usize> {
        for (index, file) in files.iter().enumerate() {
            let content = match fs::read_to_string(file.path()) {
                Ok(c) => c,
                Err(e) => {
                    warn!("Failed to read {}: {}", file.path().display(), e);
                    continue;
                }
            };

            let budget = TokenBudget::measure(
                &prompts::incremental_prompt("", &normalize_path(file.path()), &content),
                model,
            );
            if budget.exceeded() {
                warn!(
                    "{} exceeds the token limit for {} ({} > {}); consider splitting it",
                    file.path().display(),
                    model,
                    budget.tokens,
                    budget.limit.unwrap_or_default()
                );
            }

            let prompt_path = self.prompt_path(index);
            fs::write(&prompt_path, &content)
                .with_context(|| format!("Failed to write {}", prompt_path.display()))?;
            let response_path = self.response_path(index);
            fs::write(&response_path, RESPONSE_PLACEHOLDER)
                .with_context(|| format!("Failed to write {}", response_path.display()))?;

            self.entries.push(SessionEntry {
                index,
                source: file.path().to_path_buf(),
            });
        }

        Ok(self.entries.len())
    }

    /// Write `_file-tree.txt` listing every queued file
    pub fn write_file_tree(&self) -> Result<PathBuf> {
        let mut tree = String::from("# File Tree\n\n");
        for entry in &self.entries {
            tree.push_str("- ");
            tree.push_str(&entry.label());
            tree.push('\n');
        }

        let path = self.file_tree_path();
        fs::write(&path, tree).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Read the file list back from a session's `_file-tree.txt`
pub fn read_file_tree(session_dir: &Path) -> Result<Vec<String>> {
    let path = session_dir.join(FILE_TREE_FILE);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read file tree {}", path.display()))?;

    Ok(text
        .lines()
        .filter_map(|line| line.strip_prefix("- "))
        .map(str::to_string)
        .collect())
}
