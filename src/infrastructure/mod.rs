pub mod config;
pub mod embedding;
pub mod extraction;
pub mod llm;
pub mod vector_store;

pub use config::{AppConfig, Config, PromptsConfig};
pub use embedding::{create_embedding, HashingEmbedding, OpenAiEmbedding};
pub use extraction::PdfTextExtractor;
pub use llm::{create_llm, AnthropicLlm, GeminiLlm};
pub use vector_store::{in_memory_factory, InMemoryVectorIndex};
