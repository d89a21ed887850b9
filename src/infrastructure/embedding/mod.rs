mod hashing;
#[cfg(feature = "local-embeddings")]
mod local;
mod openai;

use std::sync::Arc;

pub use hashing::HashingEmbedding;
#[cfg(feature = "local-embeddings")]
pub use local::LocalEmbedding;
pub use openai::OpenAiEmbedding;

use crate::domain::{ports::EmbeddingService, DomainError};
use crate::infrastructure::config::{require_env, EmbeddingConfig};

/// Builds the embedder named by `embedding.provider`.
///
/// `local` runs a pre-trained sentence model in-process and is the default.
/// `hashing` is a lexical stand-in for tests and offline runs; retrieval with
/// it matches shared words, not meaning.
pub fn create_embedding(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingService>, DomainError> {
    match config.provider.as_str() {
        "hashing" => {
            tracing::warn!(
                dimension = config.dimension,
                "using the hashing embedder; retrieval is lexical, not semantic"
            );
            Ok(Arc::new(HashingEmbedding::new(config.dimension)))
        }
        "openai" => {
            let key = require_env(config.api_key_env.as_deref().unwrap_or(openai::API_KEY_ENV))?;
            Ok(Arc::new(OpenAiEmbedding::new(&key, config)?))
        }
        #[cfg(feature = "local-embeddings")]
        "local" => Ok(Arc::new(LocalEmbedding::from_config(config)?)),
        #[cfg(not(feature = "local-embeddings"))]
        "local" => Err(DomainError::config(
            "local embedding provider requires --features local-embeddings",
        )),
        other => Err(DomainError::config(format!(
            "unknown embedding provider: {other}"
        ))),
    }
}
