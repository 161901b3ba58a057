//! Golden tests over the fixture project
//!
//! The fixture carries its own `.exclude`, so these pin down how the pattern
//! file, pruning and binary sniffing combine on a realistic tree.

use assert_cmd::Command;
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn sample_project() -> PathBuf {
    fixtures_dir().join("sample_project")
}

fn chat_tree_cmd() -> Command {
    let mut cmd = Command::cargo_bin("chat-tree").expect("Failed to find chat-tree binary");
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

fn relative_lines(stdout: &[u8]) -> BTreeSet<String> {
    let base = sample_project();
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            PathBuf::from(l)
                .strip_prefix(&base)
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_else(|_| l.to_string())
        })
        .collect()
}

#[test]
fn golden_list_sample_project() {
    let project = sample_project();
    let output = chat_tree_cmd()
        .arg("list")
        .arg(&project)
        .arg("--project-root")
        .arg(&project)
        .output()
        .expect("Failed to run list");

    assert!(output.status.success());

    let expected: BTreeSet<String> = [
        ".exclude",
        "README.md",
        "docs/guide.md",
        "logs/app.log",
        "src/main.rs",
        "web/app.js",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    assert_eq!(relative_lines(&output.stdout), expected);
}

#[test]
fn golden_list_sample_project_with_extra_exclude() {
    let project = sample_project();
    let output = chat_tree_cmd()
        .arg("list")
        .arg(&project)
        .args(["--exclude", "**/*.md", "--exclude", ".exclude"])
        .arg("--project-root")
        .arg(&project)
        .output()
        .expect("Failed to run list");

    assert!(output.status.success());

    let expected: BTreeSet<String> = ["logs/app.log", "src/main.rs", "web/app.js"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    assert_eq!(relative_lines(&output.stdout), expected);
}

#[test]
fn golden_json_report_sample_project() {
    let project = sample_project();
    let output = chat_tree_cmd()
        .arg("list")
        .arg(&project)
        .args(["--format", "json", "--show-skipped"])
        .arg("--project-root")
        .arg(&project)
        .output()
        .expect("Failed to run list");

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid json");

    let patterns: Vec<&str> = report["patterns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap())
        .collect();
    assert_eq!(patterns, vec!["build", "**/node_modules/**", "*.log"]);

    assert_eq!(report["files"].as_array().unwrap().len(), 6);

    let mut skipped: Vec<(String, String)> = report["skipped"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            let path = PathBuf::from(s["path"].as_str().unwrap());
            let rel = path
                .strip_prefix(&project)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            (rel, s["reason"].as_str().unwrap().to_string())
        })
        .collect();
    skipped.sort();

    assert_eq!(
        skipped,
        vec![
            ("app.log".to_string(), "excluded".to_string()),
            ("assets/logo.png".to_string(), "binary".to_string()),
            ("build".to_string(), "pruned".to_string()),
            ("web/node_modules".to_string(), "pruned".to_string()),
        ]
    );
}
