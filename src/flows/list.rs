//! List the files a walk accepts

use anyhow::Result;
use std::io;
use std::path::PathBuf;

use crate::core::render::{RenderConfig, Renderer};
use crate::walker::{walk_files, WalkOptions};

/// Run the list command
pub fn run_list(paths: &[PathBuf], options: &WalkOptions, config: RenderConfig) -> Result<()> {
    let report = walk_files(paths, options)?;

    let renderer = Renderer::with_config(config);
    renderer.render_to(&report, io::stdout().lock())?;

    Ok(())
}
