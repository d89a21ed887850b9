use std::sync::Arc;
use tracing::instrument;

use crate::application::services::{assemble_context, AnswerGenerator, DocumentService, RagService};
use crate::application::session::{KnowledgeBase, SessionStore};
use crate::domain::{DomainError, SearchResult};

/// Runs the upload and ask pipelines against the shared [`SessionStore`].
pub struct KnowledgeBaseService {
    documents: DocumentService,
    rag: RagService,
    generator: AnswerGenerator,
    session: Arc<SessionStore>,
}

impl KnowledgeBaseService {
    pub fn new(
        documents: DocumentService,
        rag: RagService,
        generator: AnswerGenerator,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            documents,
            rag,
            generator,
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn validate_media_type(&self, content_type: &str) -> Result<(), DomainError> {
        self.documents.validate_media_type(content_type)
    }

    /// Extract, chunk, embed and index a document, then replace the live
    /// knowledge base. On any failure the previous base stays in place.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Arc<KnowledgeBase>, DomainError> {
        self.documents.validate_media_type(content_type)?;

        let _rebuild = self.session.rebuild_lock().await;

        let (document, text, chunks) = self.documents.ingest(name, content_type, bytes).await?;
        let index = self.rag.build_index(&chunks).await?;
        let kb = KnowledgeBase::new(
            document,
            text,
            chunks,
            index,
            self.generator.clone(),
            self.rag.embedding_model(),
        )?;

        let document_id = kb.document.id;
        let chunk_count = kb.chunks.len();
        if let Some(previous) = self.session.replace(kb).await {
            tracing::debug!(previous = %previous.document.id, "replaced knowledge base");
        }
        tracing::info!(%document_id, chunks = chunk_count, "knowledge base ready");

        self.session.current().await
    }

    #[instrument(skip(self, question))]
    pub async fn ask(&self, question: &str, top_k: Option<usize>) -> Result<String, DomainError> {
        if question.trim().is_empty() {
            return Err(DomainError::validation("question must not be empty"));
        }

        let kb = self.session.current().await?;
        let top_k = self.rag.resolve_top_k(top_k)?;

        let results = self.rag.retrieve_top_k(&kb, question, top_k).await?;
        let context = assemble_context(&results);
        tracing::debug!(retrieved = results.len(), "context assembled");

        kb.generator().answer(question, &context).await
    }

    #[instrument(skip(self, query))]
    pub async fn search(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let kb = self.session.current().await?;
        let top_k = self.rag.resolve_top_k(limit)?;
        self.rag.retrieve_top_k(&kb, query, top_k).await
    }

    pub async fn current(&self) -> Result<Arc<KnowledgeBase>, DomainError> {
        self.session.current().await
    }
}
