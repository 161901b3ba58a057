//! Runtime configuration
//!
//! Resolved once from CLI flags and environment (clap `env`, after `.env` is
//! loaded) and passed by value to the flows that need it.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_DELAY_MS: u64 = 2000;
pub const DEFAULT_SELECTION_FILE: &str = "selected_files.txt";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Chat model used for completions and token counting
    pub model: String,

    /// API key; only required by commands that talk to the API
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    pub api_base: String,

    /// Directory that session directories are created under
    pub output_dir: PathBuf,

    /// Pause between consecutive completion requests
    pub request_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            request_delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl AppConfig {
    /// API base without a trailing slash, ready for joining endpoint paths
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
