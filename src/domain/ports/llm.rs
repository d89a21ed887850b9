use crate::domain::{errors::DomainError, GenerationParams};
use async_trait::async_trait;

#[async_trait]
pub trait LlmService: Send + Sync {
    /// Returns the first generated candidate verbatim.
    async fn generate(&self, prompt: &str, params: &GenerationParams)
        -> Result<String, DomainError>;
    fn model_name(&self) -> &str;
}
