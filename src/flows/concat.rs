//! Concatenate selected files
//!
//! The selection file holds one path per line, as written by an interactive
//! file picker; blank lines are ignored.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Read a selection file. A missing file means nothing is selected.
pub fn load_selection(path: &Path) -> Result<Vec<PathBuf>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e).with_context(|| format!("Failed to read selection {}", path.display())),
    }
}

/// Write each file as a path header followed by its content.
///
/// Unreadable files are reported inline and skipped. Returns how many files
/// were written.
pub fn concatenate<W: Write>(files: &[PathBuf], mut out: W) -> io::Result<usize> {
    writeln!(out, "--- Concatenated Output ---")?;
    let mut written = 0;
    for path in files {
        match fs::read_to_string(path) {
            Ok(content) => {
                writeln!(out, "\n{}\n{}", path.display(), content.trim_end())?;
                written += 1;
            }
            Err(e) => {
                warn!("Error reading {}: {}", path.display(), e);
                writeln!(out, "\n{}\n[error reading file: {}]", path.display(), e)?;
            }
        }
    }
    writeln!(out, "\n--- Done! ---")?;
    Ok(written)
}

/// Run the concat command: explicit paths win over the selection file
pub fn run_concat(paths: &[PathBuf], selection: &Path) -> Result<()> {
    let files = if paths.is_empty() {
        load_selection(selection)?
    } else {
        paths.to_vec()
    };

    if files.is_empty() {
        println!("No files selected.");
        return Ok(());
    }

    concatenate(&files, io::stdout().lock())?;
    Ok(())
}
