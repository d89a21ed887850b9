use std::sync::Arc;
use tracing::instrument;

use crate::application::session::KnowledgeBase;
use crate::domain::{
    ports::{EmbeddingService, VectorIndex, VectorIndexFactory},
    DocumentChunk, DomainError, SearchResult,
};

/// Joins retrieved chunk texts in retrieval order, separated by one space.
pub fn assemble_context(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.chunk.content.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct RagService {
    embedding: Arc<dyn EmbeddingService>,
    index_factory: Arc<dyn VectorIndexFactory>,
    default_top_k: usize,
    max_top_k: usize,
}

impl RagService {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        index_factory: Arc<dyn VectorIndexFactory>,
        default_top_k: usize,
    ) -> Self {
        Self {
            embedding,
            index_factory,
            default_top_k,
            max_top_k: default_top_k.max(20),
        }
    }

    pub fn with_max_top_k(mut self, max_top_k: usize) -> Self {
        self.max_top_k = max_top_k;
        self
    }

    pub fn embedding_model(&self) -> &str {
        self.embedding.model_name()
    }

    /// Clamps a requested `top_k` to `1..=max_top_k`, defaulting when absent.
    pub fn resolve_top_k(&self, requested: Option<usize>) -> Result<usize, DomainError> {
        match requested {
            Some(0) => Err(DomainError::validation("top_k must be at least 1")),
            Some(k) => Ok(k.min(self.max_top_k)),
            None => Ok(self.default_top_k),
        }
    }

    /// Embeds every chunk and builds a fresh index whose ids are chunk indexes.
    #[instrument(skip(self, chunks), fields(count = chunks.len()))]
    pub async fn build_index(
        &self,
        chunks: &[DocumentChunk],
    ) -> Result<Box<dyn VectorIndex>, DomainError> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(DomainError::external(format!(
                "embedder returned {} vectors for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let index = self.index_factory.create();
        index.build(embeddings)?;
        tracing::debug!(dimension = ?index.dimension(), "index built");
        Ok(index)
    }

    #[instrument(skip(self, kb, query))]
    pub async fn retrieve_top_k(
        &self,
        kb: &KnowledgeBase,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let embedding = self.embedding.embed(query).await?;
        let hits = kb.index().search(&embedding, top_k)?;

        hits.into_iter()
            .map(|hit| {
                Ok(SearchResult {
                    chunk: kb.chunk(hit.id)?.clone(),
                    distance: hit.distance,
                })
            })
            .collect()
    }
}
