use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::gemini;
use serde_json::json;

use crate::domain::{ports::LlmService, DomainError, GenerationParams};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub struct GeminiLlm {
    client: gemini::Client,
    model: String,
}

impl GeminiLlm {
    pub fn new(api_key: &str, model: impl Into<String>) -> Result<Self, DomainError> {
        let client = <gemini::Client>::new(api_key)
            .map_err(|e| DomainError::config(format!("gemini client: {e}")))?;

        Ok(Self {
            client,
            model: model.into(),
        })
    }
}

/// Gemini takes sampling knobs inside `generationConfig`.
fn generation_config(params: &GenerationParams) -> serde_json::Value {
    let mut config = json!({ "maxOutputTokens": params.max_tokens });
    if let Some(top_p) = params.effective_top_p() {
        config["topP"] = json!(top_p);
    }
    if let Some(seed) = params.seed {
        config["seed"] = json!(seed);
    }
    json!({ "generationConfig": config })
}

#[async_trait]
impl LlmService for GeminiLlm {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, DomainError> {
        let agent = self
            .client
            .agent(&self.model)
            .temperature(params.effective_temperature())
            .max_tokens(params.max_tokens)
            .additional_params(generation_config(params))
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
