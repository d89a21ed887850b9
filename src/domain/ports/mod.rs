mod embedding;
mod llm;
mod text_extractor;
mod vector_index;

pub use embedding::EmbeddingService;
pub use llm::LlmService;
pub use text_extractor::TextExtractor;
pub use vector_index::{VectorIndex, VectorIndexFactory};
