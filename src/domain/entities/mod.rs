mod document;
mod embedding;
mod generation;
mod prompt;

pub use document::{
    chunk_content, split_paragraphs, Document, DocumentChunk, SearchHit, SearchResult, MIME_PDF,
};
pub use embedding::Embedding;
pub use generation::GenerationParams;
pub use prompt::PromptTemplate;
