//! Prompt text for documentation and review passes

/// Instructions sent with every file during the incremental pass
pub const BUILD_PROMPT: &str = "\
You are helping to generate documentation for a software project.

You will receive code **one file at a time**, together with the documentation you produced so far.

For each file:
- Treat the previous documentation as the base and **add to or revise** it only where the new file adds relevant information.
- Do not speculate. If the file adds nothing, return the previous documentation unchanged.
- Always answer with the complete documentation, never a diff or a partial section.

The finished documentation should contain:
- A **high-level overview** of what the program does
- The **top-level commands or features** available to someone running the program (not internal helpers)
- **Sample usage**
- The key modules and how they interact

Use this layout:

# Project Name

## Overview
...

## Available Commands
- `command-name`: What it does
  - Example usage...

## Modules / Features
- Description of key modules
- Their roles / interactions
";

/// Instructions for the final review pass
pub const REVIEW_PROMPT: &str = "\
You are now reviewing the final documentation for accuracy.

You will receive:
- The full documentation that was previously generated
- The list of files it was generated from

Review the documentation for accuracy, completeness, and clarity. Revise anything that is wrong, unclear, or missing; otherwise return it unchanged. Work with the listed files only.";

/// Prompt for one step of the incremental pass
pub fn incremental_prompt(previous_doc: &str, file_label: &str, file_content: &str) -> String {
    let mut prompt = String::with_capacity(
        BUILD_PROMPT.len() + previous_doc.len() + file_content.len() + 64,
    );
    prompt.push_str(BUILD_PROMPT);
    if !previous_doc.is_empty() {
        prompt.push_str("\n\n# Previous Documentation\n");
        prompt.push_str(previous_doc);
    }
    prompt.push_str("\n\n# Current File: ");
    prompt.push_str(file_label);
    prompt.push_str("\n```\n");
    prompt.push_str(file_content.trim());
    prompt.push_str("\n```");
    prompt
}

/// Prompt for the review pass
pub fn review_prompt(documentation: &str, files: &[String]) -> String {
    let file_list: String = files.iter().map(|f| format!("- {}\n", f)).collect();
    format!(
        "{}\n\n# Documentation to Review\n\n{}\n\n# Files Reviewed\n\n{}",
        REVIEW_PROMPT, documentation, file_list
    )
}
