//! Project root discovery

use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::WalkError;

/// Files or directories whose presence marks a project root
pub const PROJECT_MARKERS: &[&str] = &[".git", "Cargo.toml", "go.mod"];

/// Search `start` and its ancestors for the nearest directory holding a
/// project marker
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| PROJECT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

/// Project root for the current working directory.
///
/// Falls back to the working directory itself (with a warning) when no marker
/// is found. Fails only when the working directory cannot be determined.
pub fn resolve_project_root() -> Result<PathBuf, WalkError> {
    let cwd = env::current_dir().map_err(WalkError::NoUsableRoot)?;

    match find_project_root_from(&cwd) {
        Some(root) => {
            debug!("Project root: {}", root.display());
            Ok(root)
        }
        None => {
            warn!(
                "Could not find project root (no {} above {}); using the current directory",
                PROJECT_MARKERS.join(", "),
                cwd.display()
            );
            Ok(cwd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_finds_git_marker_above_start() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let nested = temp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_project_root_from(&nested),
            Some(temp.path().to_path_buf())
        );
    }

    #[test]
    fn test_nearest_marker_wins() {
        let temp = tempdir().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let member = temp.path().join("crates/member");
        fs::create_dir_all(member.join("src")).unwrap();
        fs::write(member.join("Cargo.toml"), "[package]\n").unwrap();

        assert_eq!(find_project_root_from(&member.join("src")), Some(member));
    }

    #[test]
    fn test_go_mod_marker() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("go.mod"), "module x\n").unwrap();

        assert_eq!(
            find_project_root_from(temp.path()),
            Some(temp.path().to_path_buf())
        );
    }
}
