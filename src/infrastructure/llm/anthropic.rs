use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::anthropic;
use serde_json::json;

use crate::domain::{ports::LlmService, DomainError, GenerationParams};

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

pub struct AnthropicLlm {
    client: anthropic::Client,
    model: String,
}

impl AnthropicLlm {
    pub fn new(api_key: &str, model: impl Into<String>) -> Result<Self, DomainError> {
        let client = <anthropic::Client>::new(api_key)
            .map_err(|e| DomainError::config(format!("anthropic client: {e}")))?;

        Ok(Self {
            client,
            model: model.into(),
        })
    }
}

fn extra_params(params: &GenerationParams) -> serde_json::Value {
    match params.effective_top_p() {
        Some(top_p) => json!({ "top_p": top_p }),
        None => json!({}),
    }
}

#[async_trait]
impl LlmService for AnthropicLlm {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, DomainError> {
        if params.seed.is_some() {
            tracing::debug!(model = %self.model, "anthropic does not accept a seed, ignoring");
        }

        let agent = self
            .client
            .agent(&self.model)
            .temperature(params.effective_temperature())
            .max_tokens(params.max_tokens)
            .additional_params(extra_params(params))
            .build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| DomainError::generation(e.to_string()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
