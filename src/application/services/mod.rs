mod answer;
mod document;
mod knowledge_base;
mod rag;

pub use answer::AnswerGenerator;
pub use document::DocumentService;
pub use knowledge_base::KnowledgeBaseService;
pub use rag::{assemble_context, RagService};
