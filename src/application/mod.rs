//! Application layer - Use cases and orchestration.
//!
//! Services depend on domain ports (traits) rather than concrete
//! implementations. [`session`] owns the single live knowledge base.

pub mod services;
pub mod session;

pub use services::{
    assemble_context, AnswerGenerator, DocumentService, KnowledgeBaseService, RagService,
};
pub use session::{KnowledgeBase, SessionStore};
