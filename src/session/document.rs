//! Incremental documentation and review passes

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::prompts::{incremental_prompt, review_prompt};
use super::{read_file_tree, Session, DOCUMENTATION_FILE, REVIEW_FILE};
use crate::client::CompletionClient;

/// What a documentation run produced
#[derive(Debug, Clone)]
pub struct DocumentOutcome {
    pub documentation: PathBuf,
    pub review: Option<PathBuf>,
    pub answered: usize,
    pub failed: usize,
}

/// Feed the session's files to the model one at a time, each step building
/// on the previous answer, then save the result and run a review pass.
///
/// A failed request is logged and skipped; the documentation so far carries
/// over to the next file. A failed review leaves the documentation in place.
pub fn build_documentation<C: CompletionClient + ?Sized>(
    client: &C,
    session: &Session,
    delay: Duration,
) -> Result<DocumentOutcome> {
    if session.entries().is_empty() {
        bail!("no prompt files found in {}", session.dir().display());
    }

    let mut previous = String::new();
    let mut answered = 0;
    let mut failed = 0;

    for (step, entry) in session.entries().iter().enumerate() {
        let prompt_path = session.prompt_path(entry.index);
        let content = match fs::read_to_string(&prompt_path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to read {}: {}", prompt_path.display(), e);
                failed += 1;
                continue;
            }
        };

        if step > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }

        let prompt = incremental_prompt(&previous, &entry.label(), &content);
        info!("Prompt #{:05}: passing {} in for review", entry.index, entry.label());
        debug!("Prompt #{:05}:\n{}", entry.index, prompt);

        match client.complete(&prompt) {
            Ok(response) => {
                debug!("Response #{:05}:\n{}", entry.index, response);
                let response_path = session.response_path(entry.index);
                if let Err(e) = fs::write(&response_path, &response) {
                    warn!("Failed to write {}: {}", response_path.display(), e);
                }
                previous = response;
                answered += 1;
            }
            Err(e) => {
                warn!("Failed to get response for {}: {}", prompt_path.display(), e);
                failed += 1;
            }
        }
    }

    let documentation = session.documentation_path();
    fs::write(&documentation, &previous)
        .with_context(|| format!("Failed to write {}", documentation.display()))?;

    let mut files: Vec<String> = session.entries().iter().map(|e| e.label()).collect();
    files.sort();

    let review = match review_documentation(client, session.dir(), &previous, &files) {
        Ok(path) => Some(path),
        Err(e) => {
            warn!("Review pass failed: {:#}", e);
            None
        }
    };

    Ok(DocumentOutcome {
        documentation,
        review,
        answered,
        failed,
    })
}

/// Ask the model to review finished documentation and save its answer
pub fn review_documentation<C: CompletionClient + ?Sized>(
    client: &C,
    session_dir: &Path,
    documentation: &str,
    files: &[String],
) -> Result<PathBuf> {
    let prompt = review_prompt(documentation, files);
    debug!("Review prompt:\n{}", prompt);

    let response = client.complete(&prompt).context("review prompt failed")?;

    let path = session_dir.join(REVIEW_FILE);
    fs::write(&path, response)
        .with_context(|| format!("Failed to save review output {}", path.display()))?;
    Ok(path)
}

/// Review an existing session directory
pub fn review_session<C: CompletionClient + ?Sized>(
    client: &C,
    session_dir: &Path,
) -> Result<PathBuf> {
    let doc_path = session_dir.join(DOCUMENTATION_FILE);
    let documentation = fs::read_to_string(&doc_path)
        .with_context(|| format!("Failed to read documentation file {}", doc_path.display()))?;

    let mut files = read_file_tree(session_dir).unwrap_or_else(|e| {
        warn!("{:#}", e);
        Vec::new()
    });
    files.sort();

    review_documentation(client, session_dir, &documentation, &files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientError;
    use crate::core::model::FileRecord;
    use std::cell::RefCell;
    use tempfile::{tempdir, TempDir};

    /// Replies "doc v{n}" and records every prompt; fails on prompts
    /// containing `fail_on`
    struct StubClient {
        prompts: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl StubClient {
        fn new() -> Self {
            Self {
                prompts: RefCell::new(Vec::new()),
                fail_on: None,
            }
        }

        fn failing_on(marker: &'static str) -> Self {
            Self {
                fail_on: Some(marker),
                ..Self::new()
            }
        }
    }

    impl CompletionClient for StubClient {
        fn complete(&self, prompt: &str) -> Result<String, ClientError> {
            let mut prompts = self.prompts.borrow_mut();
            prompts.push(prompt.to_string());
            if self.fail_on.map(|m| prompt.contains(m)).unwrap_or(false) {
                return Err(ClientError::EmptyResponse);
            }
            Ok(format!("doc v{}", prompts.len()))
        }

        fn list_models(&self) -> Result<Vec<String>, ClientError> {
            Ok(vec!["stub".to_string()])
        }
    }

    fn session_with(files: &[(&str, &str)]) -> (TempDir, Session) {
        let temp = tempdir().unwrap();
        let mut records = Vec::new();
        for (name, content) in files {
            let path = temp.path().join(name);
            fs::write(&path, content).unwrap();
            records.push(FileRecord::new(path));
        }
        let mut session = Session::create_at(temp.path().join("session")).unwrap();
        session.queue_files(&records, "gpt-4-turbo").unwrap();
        session.write_file_tree().unwrap();
        (temp, session)
    }

    #[test]
    fn test_each_step_builds_on_previous_response() {
        let (_temp, session) = session_with(&[("a.rs", "fn a() {}"), ("b.rs", "fn b() {}")]);
        let client = StubClient::new();

        let outcome = build_documentation(&client, &session, Duration::ZERO).unwrap();

        let prompts = client.prompts.borrow();
        assert_eq!(prompts.len(), 3); // two files + review
        assert!(!prompts[0].contains("# Previous Documentation"));
        assert!(prompts[1].contains("# Previous Documentation\ndoc v1"));
        assert!(prompts[1].contains("fn b() {}"));

        assert_eq!(outcome.answered, 2);
        assert_eq!(outcome.failed, 0);
        assert_eq!(fs::read_to_string(session.response_path(0)).unwrap(), "doc v1");
        assert_eq!(fs::read_to_string(&outcome.documentation).unwrap(), "doc v2");
        let review = outcome.review.unwrap();
        assert_eq!(fs::read_to_string(review).unwrap(), "doc v3");
    }

    #[test]
    fn test_failed_step_carries_previous_doc_forward() {
        let (_temp, session) = session_with(&[
            ("a.rs", "fn a() {}"),
            ("b.rs", "BROKEN"),
            ("c.rs", "fn c() {}"),
        ]);
        let client = StubClient::failing_on("BROKEN");

        let outcome = build_documentation(&client, &session, Duration::ZERO).unwrap();

        let prompts = client.prompts.borrow();
        assert!(prompts[2].contains("# Previous Documentation\ndoc v1"));
        assert_eq!(outcome.answered, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(
            fs::read_to_string(session.response_path(1)).unwrap(),
            crate::session::RESPONSE_PLACEHOLDER
        );
    }

    #[test]
    fn test_review_lists_sorted_files() {
        let (_temp, session) = session_with(&[("z.rs", "z"), ("a.rs", "a")]);
        let client = StubClient::new();

        build_documentation(&client, &session, Duration::ZERO).unwrap();

        let prompts = client.prompts.borrow();
        let review = prompts.last().unwrap();
        let a = review.find("a.rs\n").unwrap();
        let z = review.find("z.rs\n").unwrap();
        assert!(a < z);
    }

    #[test]
    fn test_empty_session_is_error() {
        let temp = tempdir().unwrap();
        let session = Session::create_at(temp.path().join("empty")).unwrap();
        let err = build_documentation(&StubClient::new(), &session, Duration::ZERO).unwrap_err();
        assert!(err.to_string().contains("no prompt files"));
    }

    #[test]
    fn test_review_existing_session() {
        let (_temp, session) = session_with(&[("a.rs", "fn a() {}")]);
        fs::write(session.documentation_path(), "# Existing").unwrap();
        let client = StubClient::new();

        let path = review_session(&client, session.dir()).unwrap();

        assert_eq!(path, session.dir().join(REVIEW_FILE));
        let prompts = client.prompts.borrow();
        assert!(prompts[0].contains("# Documentation to Review\n\n# Existing"));
        assert!(prompts[0].contains("a.rs"));
    }

    #[test]
    fn test_review_without_documentation_fails() {
        let temp = tempdir().unwrap();
        assert!(review_session(&StubClient::new(), temp.path()).is_err());
    }
}
