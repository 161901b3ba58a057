//! Document and review flows

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::client::OpenAiClient;
use crate::core::config::AppConfig;
use crate::session::{build_documentation, review_session, Session};
use crate::walker::{walk_files, WalkOptions};

/// Walk the given paths, queue every accepted file into a new session, and
/// build documentation from them
pub fn run_document(paths: &[PathBuf], options: &WalkOptions, config: &AppConfig) -> Result<()> {
    let report = walk_files(paths, options)?;
    if report.is_empty() {
        println!("No files found after exclusions.");
        return Ok(());
    }
    info!(
        "{} file(s) accepted, {} entr(ies) skipped",
        report.len(),
        report.skipped.len()
    );

    let client = OpenAiClient::from_config(config)?;

    let mut session = Session::create(&config.output_dir)?;
    session.queue_files(&report.files, &config.model)?;
    session.write_file_tree()?;
    println!("Session written to: {}", session.dir().display());

    let outcome = build_documentation(&client, &session, config.request_delay)?;

    println!(
        "{} Final documentation saved to: {} ({} answered, {} failed)",
        "✓".green(),
        outcome.documentation.display(),
        outcome.answered,
        outcome.failed
    );
    match &outcome.review {
        Some(path) => println!("{} Review documentation saved to: {}", "✓".green(), path.display()),
        None => println!("{} Review pass did not complete", "!".yellow()),
    }
    println!("Documentation generation complete.");

    Ok(())
}

/// Run a review pass over an existing session directory
pub fn run_review(session_dir: &Path, config: &AppConfig) -> Result<()> {
    let client = OpenAiClient::from_config(config)?;
    let path = review_session(&client, session_dir)?;
    println!("{} Review complete: {}", "✓".green(), path.display());
    Ok(())
}
