//! Flows module - Command implementations built on the walker
//!
//! Provides:
//! - list: Print the files a walk accepts
//! - document: Walk, queue a session, build and review documentation
//! - ask: One-off prompts and model listing
//! - concat: Concatenate a selection of files

pub mod ask;
pub mod concat;
pub mod document;
pub mod list;
