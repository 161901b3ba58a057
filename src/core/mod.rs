//! Core module - Shared data structures and utilities
//!
//! This module provides:
//! - Walk result model (FileRecord, WalkReport)
//! - Rendering of walk results
//! - Path normalization utilities
//! - Runtime configuration
//! - Token counting for prompt budgeting

pub mod config;
pub mod model;
pub mod paths;
pub mod render;
pub mod tokenizer;
