//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::config::{
    AppConfig, DEFAULT_API_BASE, DEFAULT_DELAY_MS, DEFAULT_MODEL, DEFAULT_OUTPUT_DIR,
    DEFAULT_SELECTION_FILE,
};
use crate::core::render::{OutputFormat, RenderConfig};
use crate::walker::{WalkOptions, PATTERN_FILE_NAME};

/// chat-tree - walk a source tree and build documentation from it with a chat model.
#[derive(Parser, Debug)]
#[command(name = "chat-tree")]
#[command(
    author,
    version,
    about,
    long_about = r#"chat-tree walks one or more paths, drops files matched by exclude globs
or detected as binary, and feeds what is left, one file at a time, to a
chat-completion API that incrementally writes the project's documentation.

Exclude patterns come from repeated --exclude flags and from a `.exclude` file in
the project root (the nearest directory above the working directory holding
.git, Cargo.toml or go.mod). Patterns are globs matched against paths relative
to each walked path, using '/' as separator:
- `*` never crosses '/'       (`*.log` matches app.log, not logs/app.log)
- `**` crosses any depth      (`**/node_modules/**`)
- a matching directory is pruned: nothing beneath it is visited

Examples:
    chat-tree list src --exclude "**/*.snap"
    chat-tree document . --exclude target --exclude "**/fixtures/**"
    chat-tree review output/20250101_120000
    chat-tree ask --prompt "Summarize the Rust ownership model"
"#
)]
pub struct Cli {
    /// Chat model for completions and token counting.
    #[arg(
        long,
        global = true,
        env = "OPENAI_MODEL",
        default_value = DEFAULT_MODEL,
        value_name = "MODEL"
    )]
    pub model: String,

    /// API key for the chat-completion API.
    #[arg(
        long,
        global = true,
        env = "OPENAI_API_KEY",
        hide_env_values = true,
        value_name = "KEY"
    )]
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API.
    #[arg(
        long,
        global = true,
        env = "OPENAI_API_BASE",
        default_value = DEFAULT_API_BASE,
        value_name = "URL"
    )]
    pub api_base: String,

    /// Directory that session directories are created in.
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT_DIR, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Pause between completion requests, in milliseconds (0 disables).
    #[arg(long, global = true, default_value_t = DEFAULT_DELAY_MS, value_name = "MS")]
    pub delay_ms: u64,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (log every pruned, excluded and binary entry).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Paths to walk and the patterns to exclude
#[derive(Args, Debug)]
pub struct WalkArgs {
    /// Files or directories to walk.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Glob pattern to exclude (repeatable).
    #[arg(
        long,
        value_name = "PATTERN",
        long_help = "Glob pattern to exclude, relative to each walked path (repeatable).\n\n\
Merged ahead of the patterns in the project root's .exclude file."
    )]
    pub exclude: Vec<String>,

    /// Directory holding the .exclude file (skips project-root discovery).
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Name of the pattern file inside the project root.
    #[arg(long, default_value = PATTERN_FILE_NAME, value_name = "NAME")]
    pub pattern_file: String,

    /// Follow symbolic links while walking.
    #[arg(long)]
    pub follow_links: bool,
}

impl WalkArgs {
    pub fn options(&self) -> WalkOptions {
        let mut options = WalkOptions::with_patterns(self.exclude.clone());
        options.pattern_file_name = self.pattern_file.clone();
        options.follow_links = self.follow_links;
        match &self.project_root {
            Some(root) => options.project_root(root),
            None => options,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the files that survive exclusion and binary detection.
    #[command(long_about = "Walk the given paths and print every accepted file, in traversal\n\
order (directory listing order, depth first), roots in argument order.\n\n\
Examples:\n\
  chat-tree list .\n\
  chat-tree list src tests --exclude \"**/*.snap\" --format jsonl --show-skipped\n")]
    List {
        #[command(flatten)]
        walk: WalkArgs,

        /// Output format (plain/jsonl/json).
        #[arg(long, default_value = "plain", value_name = "FORMAT")]
        format: String,

        /// Pretty-print JSON output.
        #[arg(long)]
        pretty: bool,

        /// Also print skipped entries and why they were skipped.
        #[arg(long)]
        show_skipped: bool,
    },

    /// Build documentation from the accepted files, one file at a time.
    #[command(long_about = "Walk the given paths, write a session under --output-dir, send each\n\
accepted file to the chat model together with the documentation so far, then\n\
save _documentation.md and run a review pass (_review_documentation.md).\n\n\
Example:\n\
  chat-tree document . --exclude target\n")]
    Document {
        #[command(flatten)]
        walk: WalkArgs,
    },

    /// Run a review pass over an existing session.
    Review {
        /// Session directory containing _documentation.md.
        #[arg(value_name = "SESSION_DIR")]
        session_dir: PathBuf,
    },

    /// Send a single prompt and print the response.
    Ask {
        /// Prompt text.
        #[arg(long, value_name = "TEXT")]
        prompt: String,
    },

    /// List available models and their known token limits.
    Models,

    /// Concatenate selected files with their paths.
    Concat {
        /// Files to concatenate (defaults to the selection file's contents).
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Selection file, one path per line.
        #[arg(long, default_value = DEFAULT_SELECTION_FILE, value_name = "FILE")]
        selection: PathBuf,
    },
}

impl Cli {
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            output_dir: self.output_dir.clone(),
            request_delay: Duration::from_millis(self.delay_ms),
        }
    }

    /// Default log filter for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.app_config();

    match cli.command {
        Commands::List {
            walk,
            format,
            pretty,
            show_skipped,
        } => {
            let format: OutputFormat = format.parse().unwrap_or_default();
            let render_config = RenderConfig::new(format)
                .with_pretty(pretty)
                .with_skipped(show_skipped);
            crate::flows::list::run_list(&walk.paths, &walk.options(), render_config)
        }

        Commands::Document { walk } => {
            crate::flows::document::run_document(&walk.paths, &walk.options(), &config)
        }

        Commands::Review { session_dir } => {
            crate::flows::document::run_review(&session_dir, &config)
        }

        Commands::Ask { prompt } => crate::flows::ask::run_ask(&prompt, &config),

        Commands::Models => crate::flows::ask::run_models(&config),

        Commands::Concat { paths, selection } => {
            crate::flows::concat::run_concat(&paths, &selection)
        }
    }
}
