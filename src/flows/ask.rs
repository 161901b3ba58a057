//! One-off prompts and model listing

use anyhow::Result;
use colored::Colorize;

use crate::client::{CompletionClient, OpenAiClient};
use crate::core::config::AppConfig;
use crate::core::tokenizer::{count_tokens, max_tokens_for_model};

/// Send a single prompt and print the reply
pub fn run_ask(prompt: &str, config: &AppConfig) -> Result<()> {
    let client = OpenAiClient::from_config(config)?;

    println!("Using model: {}", client.model());
    println!("Token count: {}", count_tokens(prompt, &config.model));

    let response = client.complete(prompt)?;
    println!("Response:\n{}", response);

    Ok(())
}

/// List the models the API offers, with known context limits
pub fn run_models(config: &AppConfig) -> Result<()> {
    let client = OpenAiClient::from_config(config)?;
    let models = client.list_models()?;

    let lines = format_models(&models);
    for line in &lines {
        println!("{}", line);
    }

    if models.iter().any(|m| max_tokens_for_model(m).is_none()) {
        println!(
            "\n{}",
            "Some models have unknown token limits. Check the provider's model documentation for details."
                .yellow()
        );
    }

    Ok(())
}

fn format_models(models: &[String]) -> Vec<String> {
    models
        .iter()
        .map(|id| match max_tokens_for_model(id) {
            Some(max) => format!("Model ID: {} (Max tokens: {})", id, max),
            None => format!("Model ID: {} (Max tokens: unknown)", id),
        })
        .collect()
}
