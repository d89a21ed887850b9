use std::sync::Arc;
use std::time::Duration;

use crate::application::{
    AnswerGenerator, DocumentService, KnowledgeBaseService, RagService, SessionStore,
};
use crate::domain::{
    ports::{EmbeddingService, LlmService, TextExtractor},
    DomainError,
};
use crate::infrastructure::{create_embedding, create_llm, in_memory_factory, AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub knowledge_base: Arc<KnowledgeBaseService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(knowledge_base: Arc<KnowledgeBaseService>, config: AppConfig) -> Self {
        Self {
            knowledge_base,
            config: Arc::new(config),
        }
    }

    /// Wires the providers named in `config`.
    pub fn from_config(
        config: AppConfig,
        extractor: Arc<dyn TextExtractor>,
    ) -> Result<Self, DomainError> {
        let embedding = create_embedding(&config.config.embedding)?;
        let llm = create_llm(&config.config.llm)?;
        Ok(Self::with_providers(config, extractor, embedding, llm))
    }

    pub fn with_providers(
        config: AppConfig,
        extractor: Arc<dyn TextExtractor>,
        embedding: Arc<dyn EmbeddingService>,
        llm: Arc<dyn LlmService>,
    ) -> Self {
        let rag = RagService::new(
            embedding,
            Arc::new(in_memory_factory),
            config.config.rag.top_k,
        )
        .with_max_top_k(config.config.rag.max_top_k);

        let generator = AnswerGenerator::new(llm)
            .with_params(config.config.llm.generation_params())
            .with_template(config.prompts.answer.clone())
            .with_timeout(Duration::from_secs(config.config.llm.timeout_seconds));

        let service = KnowledgeBaseService::new(
            DocumentService::new(extractor),
            rag,
            generator,
            Arc::new(SessionStore::new()),
        );

        Self::new(Arc::new(service), config)
    }
}
