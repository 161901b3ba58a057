//! Completion client
//!
//! The documentation flow only needs "send a prompt, get text back" and
//! "which models exist", so that is all the trait asks for. `OpenAiClient` is
//! the HTTP implementation; tests substitute their own.

pub mod openai;

use thiserror::Error;

pub use openai::OpenAiClient;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("missing API key (set OPENAI_API_KEY or pass --api-key)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("no response from the completion API")]
    EmptyResponse,
}

/// Something that can answer a prompt
pub trait CompletionClient {
    /// Send a single user prompt and return the reply text
    fn complete(&self, prompt: &str) -> Result<String, ClientError>;

    /// Model ids available to this client, sorted
    fn list_models(&self) -> Result<Vec<String>, ClientError>;
}
