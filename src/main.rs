//! chat-tree - Walk a source tree and document it with a chat model
//!
//! chat-tree provides:
//! - File discovery with glob exclude patterns and binary detection
//! - Incremental, file-by-file documentation through a chat-completion API
//! - A review pass over finished documentation
//! - Concatenation of a hand-picked file selection

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod client;
mod core;
mod flows;
mod session;
mod walker;

fn main() -> Result<()> {
    // .env is optional; values it sets feed clap's `env` fallbacks
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .without_time()
        .init();

    cli::run(cli)
}
