mod anthropic;
mod gemini;

use std::sync::Arc;

pub use anthropic::AnthropicLlm;
pub use gemini::GeminiLlm;

use crate::domain::{ports::LlmService, DomainError};
use crate::infrastructure::config::{require_env, LlmConfig};

/// Builds the generator named by `llm.provider`. Fails when the provider's
/// API key is not in the environment.
pub fn create_llm(config: &LlmConfig) -> Result<Arc<dyn LlmService>, DomainError> {
    match config.provider.as_str() {
        "anthropic" => {
            let key = require_env(config.api_key_env.as_deref().unwrap_or(anthropic::API_KEY_ENV))?;
            Ok(Arc::new(AnthropicLlm::new(&key, &config.model)?))
        }
        "gemini" => {
            let key = require_env(config.api_key_env.as_deref().unwrap_or(gemini::API_KEY_ENV))?;
            Ok(Arc::new(GeminiLlm::new(&key, &config.model)?))
        }
        other => Err(DomainError::config(format!("unknown llm provider: {other}"))),
    }
}
