use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

/// Pre-trained sentence embedding model run in-process through fastembed.
///
/// The model is downloaded from Hugging Face on first construction and
/// cached; inference runs on the blocking pool.
pub struct LocalEmbedding {
    model: Arc<Mutex<fastembed::TextEmbedding>>,
    model_name: String,
    dimension: usize,
}

impl LocalEmbedding {
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, DomainError> {
        let (fastembed_model, dimension) = resolve_model(&config.model)?;
        let model = fastembed::TextEmbedding::try_new(
            fastembed::InitOptions::new(fastembed_model).with_show_download_progress(false),
        )
        .map_err(|e| DomainError::config(format!("failed to load {}: {e}", config.model)))?;

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            model_name: config.model.clone(),
            dimension,
        })
    }
}

fn resolve_model(name: &str) -> Result<(fastembed::EmbeddingModel, usize), DomainError> {
    match name {
        "all-minilm-l6-v2" => Ok((fastembed::EmbeddingModel::AllMiniLML6V2, 384)),
        "paraphrase-minilm-l12-v2" => Ok((fastembed::EmbeddingModel::ParaphraseMLMiniLML12V2, 384)),
        "bge-small-en-v1.5" => Ok((fastembed::EmbeddingModel::BGESmallENV15, 384)),
        "bge-base-en-v1.5" => Ok((fastembed::EmbeddingModel::BGEBaseENV15, 768)),
        other => Err(DomainError::config(format!(
            "unknown local embedding model '{other}'; supported: all-minilm-l6-v2, \
             paraphrase-minilm-l12-v2, bge-small-en-v1.5, bge-base-en-v1.5"
        ))),
    }
}

#[async_trait]
impl EmbeddingService for LocalEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        self.embed_batch(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::external("No embedding returned"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = self.model.clone();
        let owned: Vec<String> = texts.iter().map(|t| t.to_string()).collect();

        let vectors = tokio::task::spawn_blocking(move || {
            let mut model = model
                .lock()
                .map_err(|e| DomainError::internal(e.to_string()))?;
            model
                .embed(owned, None)
                .map_err(|e| DomainError::external(format!("local embedding failed: {e}")))
        })
        .await
        .map_err(|e| DomainError::internal(e.to_string()))??;

        Ok(vectors.into_iter().map(Embedding::new).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
