use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::domain::{ports::LlmService, DomainError, GenerationParams, PromptTemplate};

#[derive(Clone)]
pub struct AnswerGenerator {
    llm: Arc<dyn LlmService>,
    params: GenerationParams,
    template: PromptTemplate,
    timeout: Duration,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self {
            llm,
            params: GenerationParams::default(),
            template: PromptTemplate::default(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    pub fn build_prompt(&self, question: &str, context: &str) -> String {
        self.template.render(question, context)
    }

    /// Generates an answer. Output is sampled, so repeated calls may differ.
    #[instrument(skip(self, question, context), fields(model = %self.llm.model_name(), context_len = context.len()))]
    pub async fn answer(&self, question: &str, context: &str) -> Result<String, DomainError> {
        let prompt = self.build_prompt(question, context);

        tokio::time::timeout(self.timeout, self.llm.generate(&prompt, &self.params))
            .await
            .map_err(|_| DomainError::timeout("answer generation timed out"))?
    }
}
