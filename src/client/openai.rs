//! OpenAI-compatible chat-completion client (blocking)

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ClientError, CompletionClient};
use crate::core::config::AppConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    chat_url: String,
    models_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            chat_url: config.endpoint("chat/completions"),
            models_url: config.endpoint("models"),
        }
    }

    /// Build a client from configuration; fails without an API key
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ClientError::MissingApiKey)?;

        Ok(Self::new(api_key, config.model.as_str(), config))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Chat request: model={} prompt_bytes={}", self.model, prompt.len());

        let response = self
            .client
            .post(&self.chat_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        extract_content(response.json::<ChatResponse>()?)
    }

    fn list_models(&self) -> Result<Vec<String>, ClientError> {
        let response = self
            .client
            .get(&self.models_url)
            .bearer_auth(&self.api_key)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let mut ids: Vec<String> = response
            .json::<ModelList>()?
            .data
            .into_iter()
            .map(|m| m.id)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

fn extract_content(response: ChatResponse) -> Result<String, ClientError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or(ClientError::EmptyResponse)
}
